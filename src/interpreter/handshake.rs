//! Deferred tool-change handshake.
//!
//! When a tool-change handler program is configured, a T word does not select
//! the tool directly. Instead the executor dispatches the handler as a
//! subroutine, parks a completion routine in [`Settings::epilog`], and hands
//! control back to the host. When the handler returns, the host's subroutine
//! machinery calls [`run_epilog`], which commits or aborts the prepare.

use serde::{Deserialize, Serialize};

use crate::interpreter::block::Block;
use crate::interpreter::expr::TOLERANCE_EQUAL;
use crate::interpreter::host::{Canon, HandlerCaller, ToolTable};
use crate::runtime::error::{InterpResult, Status};
use crate::runtime::settings::{Epilog, Settings, round_to_int};

/// Which handler a deferred call stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemapTag {
    /// T word (tool prepare)
    ToolPrepare,
    /// M6 (tool change)
    ToolChange,
    /// Program abort cleanup
    OnAbort,
}

/// Start a handler call with `epilog` as its completion routine.
///
/// Resets the sequence counter for the handler's own lines and replaces any
/// routine left over from an earlier call. If the handler cannot be started,
/// the routine is dropped and the caller's sequence number is restored.
pub fn dispatch_deferred<H: HandlerCaller + ?Sized>(
    host: &mut H,
    settings: &mut Settings,
    command: &str,
    epilog: Epilog,
    tag: RemapTag,
) -> InterpResult<Status> {
    let caller_sequence = settings.sequence_number;
    settings.sequence_number = 1;
    settings.epilog = Some(epilog);
    tracing::info!(command, ?tag, "dispatching deferred handler");
    host.call_handler(settings, command, tag).inspect_err(|err| {
        tracing::warn!(command, error = %err, "handler failed to start");
        settings.epilog = None;
        settings.sequence_number = caller_sequence;
    })
}

/// Handler invocation text: `"<template> [<tool>] [<pocket>]"`.
pub fn tool_change_command(template: &str, tool: i32, pocket: i32) -> String {
    format!("{} [{}] [{}]", template, tool, pocket)
}

/// Resolve the pocket for the block's T word and dispatch the handler.
///
/// With `remove_trail` the T word is consumed before the lookup, so a failed
/// lookup leaves it cleared.
pub fn prepare_tool<H: ToolTable + HandlerCaller + ?Sized>(
    host: &mut H,
    block: &mut Block,
    settings: &mut Settings,
    template: &str,
    remove_trail: bool,
) -> InterpResult<RemapTag> {
    let tool = block.t_number;
    if remove_trail {
        block.t_flag = false;
    }
    let pocket = host.find_tool_pocket(settings, tool)?;
    let command = tool_change_command(template, tool, pocket);

    dispatch_deferred(
        host,
        settings,
        &command,
        Epilog::FinishToolPrepare { tool },
        RemapTag::ToolPrepare,
    )?;
    Ok(RemapTag::ToolPrepare)
}

/// Commit the pocket the handler returned, or abort if it reported failure.
///
/// A failed prepare is signalled to the machine and the abort path; this
/// function itself still returns `Status::Ok`.
pub fn finish_tool_prepare<C: Canon + ?Sized>(
    canon: &mut C,
    settings: &mut Settings,
    tool: i32,
) -> InterpResult<Status> {
    let value = settings.return_value;
    if value > -TOLERANCE_EQUAL {
        settings.selected_pocket = round_to_int(value);
        tracing::info!(tool, pocket = settings.selected_pocket, "tool prepare committed");
        canon.select_pocket(settings.selected_pocket);
    } else {
        tracing::warn!(tool, value, "tool prepare failed");
        canon.canon_error(&format!("T<tool> - prepare failed ({:.6})", value));
        canon.send_handler_abort(round_to_int(value));
    }
    Ok(Status::Ok)
}

/// Run and clear the pending completion routine, if any.
pub fn run_epilog<C: Canon + ?Sized>(canon: &mut C, settings: &mut Settings) -> InterpResult<Status> {
    match settings.take_epilog() {
        Some(Epilog::FinishToolPrepare { tool }) => finish_tool_prepare(canon, settings, tool),
        None => Ok(Status::Ok),
    }
}
