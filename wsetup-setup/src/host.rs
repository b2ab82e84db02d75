//! Decisions and messages that need the user.

use tracing::warn;
use wsetup_model::WritingSystemDefinition;

/// What to do with data written in a writing system that is being deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataDecision {
    /// Delete the writing system and anything written in it.
    Delete,
    /// Merge it into the writing system tagged `with`.
    Conflate { with: String },
    /// Abandon the deletion.
    Nothing,
}

/// Answer to a confirmation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    Approved,
    Denied { reason: String },
}

/// How a `delete_current` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The host chose [`DataDecision::Nothing`]; nothing changed.
    Cancelled,
    /// The host refused; the message was reported and nothing changed.
    Declined { message: String },
    Deleted { tag: String },
    Conflated { source: String, target: String },
}

/// The application hosting the setup model.
///
/// Every method has a default: delete without conflating, approve every
/// request and log problems.
pub trait SetupHost {
    /// Asks what should happen to data in `doomed`.
    fn what_to_do_with_data(&mut self, doomed: &WritingSystemDefinition) -> DataDecision {
        let _ = doomed;
        DataDecision::Delete
    }

    /// Asks whether `source_tag` may be merged into `target_tag`.
    fn ok_to_conflate(&mut self, source_tag: &str, target_tag: &str) -> Approval {
        let _ = (source_tag, target_tag);
        Approval::Approved
    }

    /// Asks whether `tag` may be deleted.
    fn ok_to_delete(&mut self, tag: &str) -> Approval {
        let _ = tag;
        Approval::Approved
    }

    /// Tells the user something went wrong.
    fn report_problem(&mut self, message: &str) {
        warn!(message = %message, "Writing system setup problem");
    }
}

/// Host that takes every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHost;

impl SetupHost for DefaultHost {}
