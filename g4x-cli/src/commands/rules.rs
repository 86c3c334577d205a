//! Rule table commands

use lib_compensation::RuleTableConfig;
use lib_types::RuleTable;

use crate::argument_parsing::{CliContext, PresetSelection, RulesAction, RulesArgs};
use crate::error::CliResult;
use crate::logic::format::OutputFormat;
use crate::logic::{preset_catalog, preset_lines, rule_table_lines};
use crate::output::{ConsoleOutput, Output};

// ============================================================================
// PURE LOGIC
// ============================================================================

/// Rule table to display, with the notices its presets raise
///
/// Without a selection this is the active table. Presets that are not named
/// fall back to the canonical default.
pub fn select_rule_table(
    selection: &PresetSelection,
    active: &RuleTable,
) -> CliResult<(RuleTable, Vec<String>)> {
    if selection.is_empty() {
        return Ok((active.clone(), Vec::new()));
    }
    let config = RuleTableConfig::from_presets(
        selection.referral_preset.unwrap_or_default(),
        selection.rank_preset.unwrap_or_default(),
        selection.roi_preset.unwrap_or_default(),
    );
    Ok((config.resolve()?, config.notices()))
}

// ============================================================================
// IMPERATIVE SHELL
// ============================================================================

pub async fn handle_rules_command(args: RulesArgs, ctx: &CliContext) -> CliResult<()> {
    handle_rules_command_impl(args, ctx, &ConsoleOutput)
}

fn handle_rules_command_impl(args: RulesArgs, ctx: &CliContext, output: &dyn Output) -> CliResult<()> {
    let format = ctx.settings.format;
    match args.action {
        RulesAction::Show(selection) => {
            let (rules, notices) = select_rule_table(&selection, &ctx.rules)?;
            if format == OutputFormat::Table {
                output.header("Gold4X rule table")?;
                for notice in &notices {
                    output.warning(notice)?;
                }
            }
            output.emit(format, &serde_json::to_value(&rules)?, &rule_table_lines(&rules))
        }
        RulesAction::Presets => {
            if format == OutputFormat::Table {
                output.header("Rule presets")?;
            }
            output.emit(format, &preset_catalog(), &preset_lines())
        }
    }
}
