mod ai;
mod cli;
mod color;
mod commands;
mod config;
mod domain;
mod error;
mod integrations;
mod progress;
mod providers;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::create::CreateOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = color::ColorMode::resolve(cli.color);

    match cli.command {
        Commands::Create {
            confirm,
            draft,
            base,
            head,
            web,
            reviewers,
            assignees,
            labels,
            projects,
            milestone,
            no_maintainer_edit,
            recover,
            no_ai_summary,
            no_push,
            dry_run,
            gh_args,
        } => commands::create::cmd_create(
            &CreateOptions {
                confirm,
                draft,
                base,
                head,
                web,
                reviewers,
                assignees,
                labels,
                projects,
                milestone,
                no_maintainer_edit,
                recover,
                no_ai_summary,
                no_push,
                dry_run,
                gh_args,
            },
            color_mode,
        ),
        Commands::CheckoutNew { issue } => {
            commands::checkout_new::cmd_checkout_new(issue.as_deref(), color_mode)
        }
        Commands::Init {
            global,
            local,
            force,
        } => commands::init::cmd_init(global, local, force, color_mode),
        Commands::Setup { provider } => {
            commands::setup::cmd_setup(provider.as_deref(), color_mode)
        }
    }
}
