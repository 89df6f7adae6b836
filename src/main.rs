use clap::{Parser, Subcommand};

mod cmd;
mod core;
mod money;
mod tax;

#[derive(Parser, Debug)]
#[command(name = "taxbj")]
#[command(about = "Estimate Benin business taxes under the TPS and REEL regimes")]
#[command(version)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the taxes due for a taxpayer snapshot
    Estimate(cmd::estimate::EstimateCommand),
    /// Render an estimate as an HTML report
    Html(cmd::html_report::HtmlCommand),
    /// Show the rate tables
    Rates(cmd::rates::RatesCommand),
    /// Print input and output formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Command::Estimate(estimate) => estimate.exec(),
        Command::Html(html) => html.exec(),
        Command::Rates(rates) => rates.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
