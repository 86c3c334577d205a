//! Investment quote and token conversion commands

use serde_json::json;

use lib_compensation::{g4x_to_usd, investment_quote, usd_to_g4x};

use crate::argument_parsing::{CliContext, ConvertArgs, QuoteArgs};
use crate::error::CliResult;
use crate::logic::{conversion_line, quote_lines};
use crate::output::{ConsoleOutput, Output};

pub async fn handle_quote_command(args: QuoteArgs, ctx: &CliContext) -> CliResult<()> {
    handle_quote_command_impl(args, ctx, &ConsoleOutput)
}

fn handle_quote_command_impl(args: QuoteArgs, ctx: &CliContext, output: &dyn Output) -> CliResult<()> {
    let quote = investment_quote(args.amount, args.token, args.first, &ctx.rules)?;
    output.emit(ctx.settings.format, &serde_json::to_value(quote)?, &quote_lines(&quote))
}

pub async fn handle_convert_command(args: ConvertArgs, ctx: &CliContext) -> CliResult<()> {
    handle_convert_command_impl(args, ctx, &ConsoleOutput)
}

fn handle_convert_command_impl(args: ConvertArgs, ctx: &CliContext, output: &dyn Output) -> CliResult<()> {
    let (from_unit, to_unit, converted) = if args.to == "usd" {
        ("G4X", "USD", g4x_to_usd(args.amount, &ctx.rules))
    } else {
        ("USD", "G4X", usd_to_g4x(args.amount, &ctx.rules))
    };
    let data = json!({
        "from": { "amount": args.amount, "unit": from_unit },
        "to": { "amount": converted, "unit": to_unit },
        "rateBps": ctx.rules.g4x_conversion_rate_bps,
    });
    output.emit(
        ctx.settings.format,
        &data,
        &[conversion_line(args.amount, from_unit, converted, to_unit)],
    )
}
