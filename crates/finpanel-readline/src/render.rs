//! Terminal rendering of views, turns and banners.

use colored::Colorize;
use finpanel_application::navigator::ActiveView;
use finpanel_application::panels::SUBMIT_LABEL;
use finpanel_application::{HomeView, LoanFormPanel, LoanOutcome};
use finpanel_core::route::{Route, ServiceChoice};
use finpanel_core::stock::StockSeries;
use finpanel_core::transcript::{Speaker, Turn};

const BAR_WIDTH: usize = 30;

pub fn turn(turn: &Turn) {
    match turn.speaker {
        Speaker::User => println!("{}", format!("> {}", turn.text).green()),
        Speaker::Assistant if turn.is_pending() => {
            let text: &str = if turn.text.is_empty() { "..." } else { &turn.text };
            println!("{}", text.bright_black());
        }
        Speaker::Assistant => {
            for line in turn.text.lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}

pub fn notice(message: &str) {
    println!("{}", message.bright_black());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

fn title(route: Route) {
    println!();
    println!("{}", format!("=== {} ===", route.title()).bright_magenta().bold());
}

fn switcher(current: Route) {
    let choices: Vec<String> = ServiceChoice::ALL
        .iter()
        .map(|choice| {
            let key = format!("/{}", choice.key());
            if choice.route() == current {
                key.bold().to_string()
            } else {
                key
            }
        })
        .collect();
    notice(&format!("Switch tool: {}   /logout to sign out", choices.join("  ")));
}

pub fn login() {
    title(Route::Login);
    notice("Sign in with 'login <email> <password>' or 'oauth <credential>'.");
}

pub fn home(home: &HomeView) {
    println!();
    println!("{}", home.headline.bright_magenta().bold());
    println!("{}", home.pitch);
    println!();
    for card in home.features {
        println!(
            "  {}  {}  {}",
            card.title.bold(),
            card.stat.bright_green(),
            card.path.bright_cyan()
        );
        println!("    {}", card.description.bright_black());
    }
    println!();
    let stats: Vec<String> = home
        .stats
        .iter()
        .map(|stat| format!("{} {}", stat.value.bold(), stat.label))
        .collect();
    println!("  {}", stats.join("   "));
    notice(&format!("Go To Site: /go {}", home.hero_path));
}

pub fn series(series: &StockSeries) {
    if series.is_empty() {
        return;
    }

    println!();
    println!("{}", series.table_title().bold());
    println!(
        "  {:<12} {:>10} {:>10} {:>10} {:>10}",
        "Date", "Open", "High", "Low", "Close"
    );
    for [date, open, high, low, close] in series.table_rows() {
        println!("  {:<12} {:>10} {:>10} {:>10} {:>10}", date, open, high, low, close);
    }

    println!();
    println!("{}", series.trend_title().bold());
    let points = series.chart_points();
    let prices: Vec<f64> = points
        .iter()
        .map(|point| point.price)
        .filter(|price| price.is_finite())
        .collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    for point in points {
        let bar = if point.price.is_finite() && max > min {
            let width = ((point.price - min) / (max - min) * BAR_WIDTH as f64).round() as usize;
            "█".repeat(width.max(1))
        } else if point.price.is_finite() {
            "█".repeat(BAR_WIDTH / 2)
        } else {
            String::new()
        };
        println!(
            "  {:<12} {:>10} {}",
            point.label,
            format!("{:.2}", point.price),
            bar.bright_blue()
        );
    }
}

pub fn outcome(outcome: LoanOutcome) {
    match outcome {
        LoanOutcome::Approved => println!("{}", outcome.banner().green().bold()),
        LoanOutcome::Rejected | LoanOutcome::Error => println!("{}", outcome.banner().red().bold()),
    }
}

pub async fn loan_form(panel: &LoanFormPanel) {
    let draft = panel.draft().await;
    for (field, value) in draft.fields() {
        let options = field
            .options()
            .map(|options| {
                let labels: Vec<&str> = options.iter().map(|(_, label)| *label).collect();
                format!("  [{}]", labels.join(" | "))
            })
            .unwrap_or_default();
        println!(
            "  {:<20} {}{}",
            field.label(),
            value.bold(),
            options.bright_black()
        );
    }
    let label = panel.submit_label().await;
    if label == SUBMIT_LABEL {
        notice(&format!("/set <field>=<value> to edit, /submit to {}", label.to_lowercase()));
    } else {
        notice(label);
    }
    if let Some(current) = panel.outcome().await {
        outcome(current);
    }
}

/// Prints the whole mounted view.
pub async fn view(view: &ActiveView) {
    match view {
        ActiveView::Login => login(),
        ActiveView::Home(content) => home(content),
        ActiveView::Advisor(panel) => {
            title(Route::Advisor);
            switcher(Route::Advisor);
            for entry in panel.transcript().await.turns() {
                turn(entry);
            }
        }
        ActiveView::Analysis(panel) => {
            title(Route::Analysis);
            switcher(Route::Analysis);
            series(&panel.series().await);
            if let Some(symbol) = panel.symbol().await {
                notice(&format!("Symbol: {}", symbol));
            }
            for entry in panel.transcript().await.turns() {
                turn(entry);
            }
        }
        ActiveView::Loan(panel) => {
            title(Route::Loan);
            switcher(Route::Loan);
            loan_form(panel).await;
        }
    }
}
