use azadmin::cli::{commands, Cli, Commands, GroupCommands, MgmtGroupCommands};
use azadmin::logging::init_tracing;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose, cli.global.log_json);

    let global = cli.global;
    match cli.command {
        Commands::Init(args) => commands::execute_init(args, &global)?,
        Commands::Audit(args) => commands::execute_audit(args, &global)?,
        Commands::Merge(args) => commands::execute_merge(args, &global)?,
        Commands::Group(args) => match args.command {
            GroupCommands::Create(create_args) => {
                commands::execute_group_create(create_args, &global)?
            }
        },
        Commands::MgmtGroup(args) => match args.command {
            MgmtGroupCommands::Create(create_args) => {
                commands::execute_mgmt_group_create(create_args, &global)?
            }
        },
    }

    Ok(())
}
