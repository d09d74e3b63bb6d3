use clap::Parser;
use reviewgate::cli::{
    businesses, handle_completions, handle_config_init, weights, Cli, Commands, ConfigCommands,
    WeightsCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => reviewgate::cli::serve::run_serve(args).await,
        Commands::Weights(cmd) => {
            let outcome = match cmd {
                WeightsCommands::Check(args) => Ok(weights::handle_weights_check(&args)),
                WeightsCommands::Fill(args) => weights::handle_weights_fill(&args),
            };
            match outcome {
                Ok((output, valid)) => {
                    println!("{}", output);
                    if !valid {
                        std::process::exit(1);
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Businesses(args) => match businesses::handle_businesses(&args) {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
