//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use gridiron_gazette::{
    cli::{Commands, Gazette},
    commands::{
        handle_build, handle_clean, handle_doctor, BuildParams, CleanParams, DoctorParams,
    },
    llm::BlurbParams,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger(verbose: bool) {
    let default = if verbose {
        "gridiron_gazette=debug,info"
    } else {
        "gridiron_gazette=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Gazette::parse();
    init_logger(app.verbose);

    match app.command {
        Commands::Build {
            leagues,
            week,
            week_label,
            date,
            template,
            out_dir,
            slots,
            logo_mm,
            print_logo_map,
            pdf,
            pdf_engine,
            blurbs,
            branding_test,
            blurb_test,
        } => {
            handle_build(BuildParams {
                leagues_path: leagues.leagues,
                league: leagues.league,
                multi: leagues.multi,
                week,
                week_label,
                date,
                template,
                out_dir,
                slots,
                logo_mm,
                print_logo_map,
                pdf,
                pdf_engine,
                llm_blurbs: blurbs.llm_blurbs,
                blurb: BlurbParams {
                    style: blurbs.blurb_style,
                    model: blurbs.model,
                    temperature: blurbs.temperature,
                    words: blurbs.blurb_words,
                },
                branding_test,
                blurb_test,
            })
            .await?
        }

        Commands::Doctor { leagues, template } => handle_doctor(DoctorParams {
            leagues_path: leagues.leagues,
            template,
        })?,

        Commands::Clean { outputs, out_dir } => handle_clean(CleanParams { outputs, out_dir })?,
    }

    Ok(())
}
