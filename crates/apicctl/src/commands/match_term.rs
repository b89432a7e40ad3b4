//! Match AS-path regex term command handlers.

use apic_core::{ApicFabric, Reconciler, TermParams, TermState};

use crate::cli::{GlobalOpts, MatchTermArgs, MatchTermCommand, TermKeyArgs, TermPresentArgs, TermQueryArgs};
use crate::error::CliError;
use crate::{config, output};

pub async fn handle(args: MatchTermArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let state = match args.command {
        MatchTermCommand::Present(args) => present_state(args)?,
        MatchTermCommand::Absent(args) => absent_state(args)?,
        MatchTermCommand::Query(args) => query_state(args),
    };

    // Desired state validated; only now touch the network.
    let fabric_config = config::resolve_fabric_config(global)?;
    let fabric = ApicFabric::connect(&fabric_config).await?;
    let reconciler = Reconciler::new(fabric);

    let outcome = reconciler.run(state.plan()).await?;

    let rendered = output::render_outcome(&global.output, &outcome);
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn present_state(args: TermPresentArgs) -> Result<TermState, CliError> {
    TermState::present(TermParams {
        tenant: Some(args.tenant),
        match_rule: Some(args.match_rule),
        name: Some(args.name),
        regex: args.regex,
        description: args.description,
        name_alias: args.name_alias,
        annotation: Some(args.annotation),
        owner_key: args.owner_key,
        owner_tag: args.owner_tag,
    })
    .map_err(CliError::from)
}

fn absent_state(args: TermKeyArgs) -> Result<TermState, CliError> {
    TermState::absent(TermParams {
        tenant: Some(args.tenant),
        match_rule: Some(args.match_rule),
        name: Some(args.name),
        ..TermParams::default()
    })
    .map_err(CliError::from)
}

fn query_state(args: TermQueryArgs) -> TermState {
    TermState::query(TermParams {
        tenant: args.tenant,
        match_rule: args.match_rule,
        name: args.name,
        ..TermParams::default()
    })
}
