//! Account view command

use std::sync::Arc;

use tracing::debug;

use lib_client::{AccountReader, SnapshotBuilder, StaticAccountReader};
use lib_compensation::{derive_view, RuleTableExt};

use crate::argument_parsing::{CliContext, ViewArgs};
use crate::error::{CliError, CliResult};
use crate::logic::format::OutputFormat;
use crate::logic::{view_lines, view_warnings};
use crate::output::{ConsoleOutput, Output};

/// Account reader backed by the configured snapshot file
pub fn account_reader(ctx: &CliContext) -> CliResult<Arc<dyn AccountReader>> {
    let path = ctx
        .settings
        .accounts_file
        .as_ref()
        .ok_or(CliError::NoAccountSource)?;
    debug!(path = %path.display(), "loading account snapshots");
    Ok(Arc::new(StaticAccountReader::from_json_file(path)?))
}

pub async fn handle_view_command(args: ViewArgs, ctx: &CliContext) -> CliResult<()> {
    let reader = account_reader(ctx)?;
    handle_view_command_impl(args, ctx, reader, &ConsoleOutput).await
}

async fn handle_view_command_impl(
    args: ViewArgs,
    ctx: &CliContext,
    reader: Arc<dyn AccountReader>,
    output: &dyn Output,
) -> CliResult<()> {
    let levels = args.levels.unwrap_or_else(|| ctx.rules.max_level());
    if levels > ctx.rules.max_level() {
        return Err(CliError::InvalidArgument(format!(
            "--levels {} exceeds the {} levels in the rule table",
            levels,
            ctx.rules.max_level()
        )));
    }

    let snapshot = SnapshotBuilder::new(reader).build(&args.address, levels).await;
    let view = derive_view(&snapshot, &ctx.rules);

    for warning in view_warnings(&view) {
        output.warning(&warning)?;
    }
    if ctx.settings.format == OutputFormat::Table {
        output.header("Gold4X account view")?;
    }
    output.emit(ctx.settings.format, &serde_json::to_value(&view)?, &view_lines(&view))
}
