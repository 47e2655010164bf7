//! Session: drives a genealogy of strains from a command script
//!
//! The session is a client of [`VirusGenealogy`]. It only goes through the
//! public API, logs what it does, and adds the one policy the genealogy
//! leaves to its callers: cascading removal of orphaned strains (`prune`).

mod command;
mod config;
mod strain;

pub use command::{Command, SYNOPSIS};
pub use config::SessionConfig;
pub use strain::Strain;

use crate::genealogy::{GenealogyError, VirusGenealogy};
use crate::snapshot::GenealogySnapshot;
use log::{debug, info, warn};
use std::fmt;
use std::io::{BufRead, Write};

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Genealogy(#[from] GenealogyError),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<SessionError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Result of one executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Done,
    Flag(bool),
    Strain(Strain),
    Id(String),
    Ids(Vec<String>),
    Removed(Vec<String>),
    Json(String),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Done => write!(f, "ok"),
            Output::Flag(flag) => write!(f, "{}", flag),
            Output::Strain(strain) => write!(f, "{}", strain),
            Output::Id(id) => write!(f, "{}", id),
            Output::Ids(ids) if ids.is_empty() => write!(f, "(none)"),
            Output::Ids(ids) => write!(f, "{}", ids.join(" ")),
            Output::Removed(ids) => write!(f, "removed {}", ids.join(" ")),
            Output::Json(json) => write!(f, "{}", json),
        }
    }
}

/// Counters of a finished script run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub executed: usize,
    pub failed: usize,
}

pub struct Session {
    genealogy: VirusGenealogy<Strain>,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        info!("Starting session with stem '{}'", config.stem);
        Self {
            genealogy: VirusGenealogy::new(config.stem.clone()),
            config,
        }
    }

    pub fn genealogy(&self) -> &VirusGenealogy<Strain> {
        &self.genealogy
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Execute a single command
    pub fn execute(&mut self, command: &Command) -> Result<Output> {
        debug!("Executing {:?}", command);
        let g = &mut self.genealogy;

        let output = match command {
            Command::Create { id, parents } => {
                g.create(id.clone(), parents)?;
                info!("Created strain '{}' from {:?}", id, parents);
                Output::Done
            }
            Command::Connect { child, parent } => {
                g.connect(child, parent)?;
                info!("Connected '{}' -> '{}'", parent, child);
                Output::Done
            }
            Command::Remove(id) => {
                g.remove(id)?;
                info!("Removed strain '{}'", id);
                Output::Done
            }
            Command::Prune(id) => Output::Removed(self.prune(id)?),
            Command::Exists(id) => Output::Flag(g.exists(id)),
            Command::Get(id) => Output::Strain(g.get(id)?.clone()),
            Command::Parents(id) => Output::Ids(g.parents(id)?),
            Command::Children(id) => Output::Ids(g.children(id)?),
            Command::Ancestors(id) => Output::Ids(g.ancestors(id)?),
            Command::Descendants(id) => Output::Ids(g.descendants(id)?),
            Command::Orphans => Output::Ids(g.orphans()),
            Command::Stem => Output::Id(g.stem_id().clone()),
            Command::Dump => {
                let snapshot = GenealogySnapshot::capture(&*g);
                Output::Json(snapshot.to_json(self.config.pretty_json)?)
            }
        };
        Ok(output)
    }

    /// Remove a strain, then every strain the removal leaves without parents
    ///
    /// Strains that were already orphaned before the call are kept.
    ///
    /// # Returns
    /// Removed ids, in removal order.
    pub fn prune(&mut self, id: &str) -> Result<Vec<String>> {
        let id = id.to_string();
        let g = &mut self.genealogy;
        let mut pending = g.children(&id)?;
        g.remove(&id)?;
        let mut removed = vec![id.clone()];

        while let Some(next) = pending.pop() {
            if !g.exists(&next) || !g.is_orphan(&next)? {
                continue;
            }
            pending.extend(g.children(&next)?);
            g.remove(&next)?;
            removed.push(next);
        }

        info!("Pruned {} strains starting at '{}'", removed.len(), id);
        Ok(removed)
    }

    /// Run a script, writing each command's output to `out`
    ///
    /// Failing commands are logged and counted; with
    /// [`SessionConfig::stop_on_error`] the first one aborts the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    let err = SessionError::Parse {
                        line: line_no,
                        message,
                    };
                    self.fail(&mut report, err)?;
                    continue;
                }
            };

            if self.config.echo {
                writeln!(out, "> {}", line.trim())?;
            }
            report.executed += 1;
            match self.execute(&command) {
                Ok(output) => writeln!(out, "{}", output)?,
                Err(e) => self.fail(
                    &mut report,
                    SessionError::Script {
                        line: line_no,
                        source: Box::new(e),
                    },
                )?,
            }
        }

        info!(
            "Script finished: {} commands, {} failed",
            report.executed, report.failed
        );
        Ok(report)
    }

    fn fail(&self, report: &mut ScriptReport, err: SessionError) -> Result<()> {
        report.failed += 1;
        if self.config.stop_on_error {
            return Err(err);
        }
        warn!("{}", err);
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
