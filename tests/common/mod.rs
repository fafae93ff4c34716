#![allow(dead_code)]

use std::collections::HashMap;

use rs274_exec::interpreter::block::{Block, G_93, G_94, G_95};
use rs274_exec::interpreter::handshake::RemapTag;
use rs274_exec::interpreter::host::{Canon, Diagnostics, HandlerCaller, ModalConverter, ToolTable};
use rs274_exec::runtime::{FeedMode, InterpError, InterpResult, Settings, Status};

/// Host that records every collaborator call in order.
#[derive(Default)]
pub struct MockHost {
    pub calls: Vec<String>,
    pub fail_on: Option<&'static str>,
    pub stop_status: Option<Status>,
    pub probe_on_g: bool,
    pub input_on_m: bool,
    pub pockets: HashMap<i32, i32>,
    pub handler_calls: Vec<(String, RemapTag)>,
    pub handler_error: Option<InterpError>,
    pub selected_pockets: Vec<i32>,
    pub canon_errors: Vec<String>,
    pub aborts: Vec<i32>,
    pub messages: Vec<String>,
}

impl MockHost {
    pub fn failing_on(step: &'static str) -> Self {
        Self {
            fail_on: Some(step),
            ..Self::default()
        }
    }

    fn record(&mut self, step: &'static str) -> InterpResult<()> {
        self.calls.push(step.to_string());
        if self.fail_on == Some(step) {
            return Err(InterpError::Conversion {
                code: 100,
                message: format!("{step} rejected"),
            });
        }
        Ok(())
    }
}

impl ModalConverter for MockHost {
    fn convert_comment(&mut self, _text: &str) -> InterpResult<()> {
        self.record("comment")
    }

    fn convert_spindle_mode(&mut self, _block: &Block, _settings: &mut Settings) -> InterpResult<()> {
        self.record("spindle_mode")
    }

    fn convert_feed_mode(&mut self, mode: i32, settings: &mut Settings) -> InterpResult<()> {
        self.record("feed_mode")?;
        settings.feed_mode = match mode {
            G_93 => FeedMode::InverseTime,
            G_94 => FeedMode::UnitsPerMinute,
            G_95 => FeedMode::UnitsPerRevolution,
            other => {
                return Err(InterpError::Conversion {
                    code: 101,
                    message: format!("bad feed mode {other}"),
                });
            }
        };
        Ok(())
    }

    fn convert_feed_rate(&mut self, _block: &Block, _settings: &mut Settings) -> InterpResult<()> {
        self.record("feed_rate")
    }

    fn convert_speed(&mut self, _block: &Block, _settings: &mut Settings) -> InterpResult<()> {
        self.record("speed")
    }

    fn convert_tool_select(&mut self, _block: &Block, _settings: &mut Settings) -> InterpResult<()> {
        self.record("tool_select")
    }

    fn convert_m(
        &mut self,
        _block: &mut Block,
        settings: &mut Settings,
        _remove_trail: bool,
    ) -> InterpResult<()> {
        self.record("m")?;
        if self.input_on_m {
            settings.input_flag = true;
        }
        Ok(())
    }

    fn convert_g(
        &mut self,
        _block: &mut Block,
        settings: &mut Settings,
        _remove_trail: bool,
    ) -> InterpResult<()> {
        self.record("g")?;
        if self.probe_on_g {
            settings.probe_flag = true;
        }
        Ok(())
    }

    fn convert_stop(&mut self, _block: &Block, _settings: &mut Settings) -> InterpResult<Status> {
        self.record("stop")?;
        Ok(self.stop_status.unwrap_or(Status::Ok))
    }
}

impl ToolTable for MockHost {
    fn find_tool_pocket(&mut self, _settings: &Settings, tool: i32) -> InterpResult<i32> {
        self.calls.push("find_tool_pocket".to_string());
        self.pockets
            .get(&tool)
            .copied()
            .ok_or(InterpError::UnknownPocket { tool })
    }
}

impl HandlerCaller for MockHost {
    fn call_handler(
        &mut self,
        _settings: &mut Settings,
        command: &str,
        tag: RemapTag,
    ) -> InterpResult<Status> {
        self.calls.push("call_handler".to_string());
        self.handler_calls.push((command.to_string(), tag));
        match &self.handler_error {
            Some(err) => Err(err.clone()),
            None => Ok(Status::Ok),
        }
    }
}

impl Canon for MockHost {
    fn select_pocket(&mut self, pocket: i32) {
        self.selected_pockets.push(pocket);
    }

    fn canon_error(&mut self, message: &str) {
        self.canon_errors.push(message.to_string());
    }

    fn send_handler_abort(&mut self, reason: i32) {
        self.aborts.push(reason);
    }

    fn emit_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

impl Diagnostics for MockHost {}
