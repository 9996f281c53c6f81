//! Carrying out an [`ExecutionPlan`].

use crate::commands::{wait_foreground, ExternalCommand, Flow, BUILTINS};
use crate::config::LessThanMode;
use crate::errors::ShellResult;
use crate::parser::{ExecutionPlan, Operator};
use crate::pipeline::execute_pipeline;
use crate::redirection::{Redirection, RedirectionMode};
use crate::signals::SignalState;
use std::io::Write;
use std::process::Stdio;
use std::sync::Arc;
use tracing::debug;

pub struct Executor {
    signals: Arc<SignalState>,
    less_than: LessThanMode,
}

impl Executor {
    pub fn new(signals: Arc<SignalState>, less_than: LessThanMode) -> Self {
        Self { signals, less_than }
    }

    /// Run one plan to completion. Messages for the user, such as programs
    /// that could not be started, go to `console`.
    pub fn execute<W: Write>(&self, plan: &ExecutionPlan, console: &mut W) -> ShellResult<Flow> {
        debug!(?plan, "executing");
        match plan.operator {
            Operator::None => self.run_single(&plan.left, console),
            Operator::Sequence => {
                if plan.is_empty() {
                    return Ok(Flow::Continue);
                }
                if self.run_single(&plan.left, console)? == Flow::Exit {
                    return Ok(Flow::Exit);
                }
                self.run_single(&plan.right, console)
            }
            Operator::RedirectOut => {
                if plan.is_empty() {
                    return Ok(Flow::Continue);
                }
                let target = Redirection::from_tokens(
                    &plan.right,
                    RedirectionMode::Overwrite,
                    Operator::RedirectOut,
                )?;
                self.run_redirected(&plan.left, &target, console)
            }
            Operator::RedirectIn => self.run_less_than(plan, console),
            Operator::Pipe => {
                execute_pipeline(&plan.left, &plan.right, &self.signals, console)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn run_less_than<W: Write>(&self, plan: &ExecutionPlan, console: &mut W) -> ShellResult<Flow> {
        if plan.is_empty() {
            return Ok(Flow::Continue);
        }
        match self.less_than {
            LessThanMode::TruncateOutput => {
                let target = Redirection::from_tokens(
                    &plan.left,
                    RedirectionMode::Overwrite,
                    Operator::RedirectIn,
                )?;
                if plan.right.is_empty() {
                    // Nothing to run, the target is still created or emptied.
                    target.open()?;
                    return Ok(Flow::Continue);
                }
                self.run_redirected(&plan.right, &target, console)
            }
            LessThanMode::ReadInput => {
                let source = Redirection::from_tokens(
                    &plan.right,
                    RedirectionMode::Input,
                    Operator::RedirectIn,
                )?;
                self.run_redirected(&plan.left, &source, console)
            }
        }
    }

    /// Builtins are looked up here only, so `exit` inside a redirection or a
    /// pipeline is treated as an ordinary program name.
    fn run_single<W: Write>(&self, args: &[String], console: &mut W) -> ShellResult<Flow> {
        let Some(name) = args.first() else {
            return Ok(Flow::Continue);
        };
        if let Some(result) = BUILTINS.execute(name, args, &self.signals) {
            return result;
        }

        if let Some(child) = ExternalCommand::new(args).spawn_or_report(&self.signals, console)? {
            wait_foreground(child, &self.signals)?;
        }
        Ok(Flow::Continue)
    }

    fn run_redirected<W: Write>(
        &self,
        args: &[String],
        redirection: &Redirection,
        console: &mut W,
    ) -> ShellResult<Flow> {
        let file = redirection.open()?;
        let command = match redirection.mode {
            RedirectionMode::Overwrite => ExternalCommand::new(args).stdout(file),
            RedirectionMode::Input => ExternalCommand::new(args).stdin(Stdio::from(file)),
        };
        if let Some(child) = command.spawn_or_report(&self.signals, console)? {
            wait_foreground(child, &self.signals)?;
        }
        Ok(Flow::Continue)
    }
}
