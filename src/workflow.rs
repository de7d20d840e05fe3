//! Session workflow: upload -> analysis -> fabric selection -> validation.
//!
//! The workflow owns the bound tech pack and fabric and runs the checker
//! pipeline whenever a fabric is selected. Invalid events leave the state
//! untouched.

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checker::{validate, FeasibilityConfig, ValidationOutcome};
use crate::error::ThreadLogicError;
use crate::fabric::Fabric;
use crate::techpack::{template_tech_pack, validate_tech_pack, TechPack};

/// Process step shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStep {
    Upload,
    Analysis,
    FabricSelection,
    Validation,
}

impl ProcessStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStep::Upload => "UPLOAD",
            ProcessStep::Analysis => "ANALYSIS",
            ProcessStep::FabricSelection => "FABRIC_SELECTION",
            ProcessStep::Validation => "VALIDATION",
        }
    }
}

impl fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// Waiting for a document or template
    Uploading,
    /// Tech pack extracted, awaiting confirmation
    AnalysisPending(TechPack),
    /// Tech pack confirmed, waiting for a fabric
    FabricSelection(TechPack),
    /// Both inputs bound and checked
    Validated {
        tech_pack: TechPack,
        fabric: Fabric,
        outcome: ValidationOutcome,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Uploading => "Uploading",
            WorkflowState::AnalysisPending(_) => "AnalysisPending",
            WorkflowState::FabricSelection(_) => "FabricSelection",
            WorkflowState::Validated { .. } => "Validated",
        }
    }

    pub fn step(&self) -> ProcessStep {
        match self {
            WorkflowState::Uploading => ProcessStep::Upload,
            WorkflowState::AnalysisPending(_) => ProcessStep::Analysis,
            WorkflowState::FabricSelection(_) => ProcessStep::FabricSelection,
            WorkflowState::Validated { .. } => ProcessStep::Validation,
        }
    }
}

#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    DocumentParsed(TechPack),
    TemplateSelected(String),
    AnalysisConfirmed,
    FabricSelected(Fabric),
    ChangeFabric,
    Reset,
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::DocumentParsed(_) => "DocumentParsed",
            WorkflowEvent::TemplateSelected(_) => "TemplateSelected",
            WorkflowEvent::AnalysisConfirmed => "AnalysisConfirmed",
            WorkflowEvent::FabricSelected(_) => "FabricSelected",
            WorkflowEvent::ChangeFabric => "ChangeFabric",
            WorkflowEvent::Reset => "Reset",
        }
    }
}

type Transition = Result<WorkflowState, (WorkflowState, ThreadLogicError)>;

pub struct Workflow {
    state: WorkflowState,
    config: FeasibilityConfig,
}

impl Workflow {
    pub fn new(config: FeasibilityConfig) -> Self {
        Self {
            state: WorkflowState::Uploading,
            config,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step(&self) -> ProcessStep {
        self.state.step()
    }

    pub fn config(&self) -> &FeasibilityConfig {
        &self.config
    }

    pub fn tech_pack(&self) -> Option<&TechPack> {
        match &self.state {
            WorkflowState::Uploading => None,
            WorkflowState::AnalysisPending(tp) | WorkflowState::FabricSelection(tp) => Some(tp),
            WorkflowState::Validated { tech_pack, .. } => Some(tech_pack),
        }
    }

    pub fn fabric(&self) -> Option<&Fabric> {
        match &self.state {
            WorkflowState::Validated { fabric, .. } => Some(fabric),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match &self.state {
            WorkflowState::Validated { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Apply an event and return the resulting step.
    ///
    /// # Errors
    /// `InvalidTransition` when the event does not apply to the current
    /// state, or the tech pack's own error when it fails hand-off checks.
    /// The state is unchanged on error.
    pub fn handle(&mut self, event: WorkflowEvent) -> Result<ProcessStep, ThreadLogicError> {
        let from = self.state.name();
        let event_name = event.name();
        let current = mem::replace(&mut self.state, WorkflowState::Uploading);

        match self.transition(current, event) {
            Ok(next) => {
                self.state = next;
                debug!("Workflow {} --{}--> {}", from, event_name, self.state.name());
                Ok(self.step())
            }
            Err((previous, err)) => {
                self.state = previous;
                Err(err)
            }
        }
    }

    fn transition(&self, state: WorkflowState, event: WorkflowEvent) -> Transition {
        match (state, event) {
            (_, WorkflowEvent::Reset) => Ok(WorkflowState::Uploading),

            (WorkflowState::Uploading, WorkflowEvent::DocumentParsed(tech_pack)) => {
                match validate_tech_pack(&tech_pack) {
                    Ok(()) => Ok(WorkflowState::AnalysisPending(tech_pack)),
                    Err(e) => Err((WorkflowState::Uploading, e)),
                }
            }

            (WorkflowState::Uploading, WorkflowEvent::TemplateSelected(id)) => {
                match template_tech_pack(&id) {
                    Ok(tech_pack) => Ok(WorkflowState::AnalysisPending(tech_pack)),
                    Err(e) => Err((WorkflowState::Uploading, e)),
                }
            }

            (WorkflowState::AnalysisPending(tech_pack), WorkflowEvent::AnalysisConfirmed) => {
                Ok(WorkflowState::FabricSelection(tech_pack))
            }

            (WorkflowState::FabricSelection(tech_pack), WorkflowEvent::FabricSelected(fabric))
            | (WorkflowState::Validated { tech_pack, .. }, WorkflowEvent::FabricSelected(fabric)) => {
                let outcome = validate(&tech_pack, &fabric, &self.config);
                info!(
                    "{} on {}: score {} ({})",
                    tech_pack.style_code,
                    fabric.fabric_id,
                    outcome.readiness.score,
                    outcome.readiness.status
                );
                Ok(WorkflowState::Validated {
                    tech_pack,
                    fabric,
                    outcome,
                })
            }

            (WorkflowState::Validated { tech_pack, .. }, WorkflowEvent::ChangeFabric) => {
                Ok(WorkflowState::FabricSelection(tech_pack))
            }

            (state, event) => {
                let err = ThreadLogicError::InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                };
                Err((state, err))
            }
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(FeasibilityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::find_fabric;

    #[test]
    fn test_template_path_to_validation() {
        let mut workflow = Workflow::default();
        assert_eq!(workflow.step(), ProcessStep::Upload);
        assert!(workflow.tech_pack().is_none());

        let step = workflow
            .handle(WorkflowEvent::TemplateSelected("tp-active".to_string()))
            .unwrap();
        assert_eq!(step, ProcessStep::Analysis);
        assert_eq!(workflow.tech_pack().unwrap().style_code, "LL-W-HOOD-09");

        workflow.handle(WorkflowEvent::AnalysisConfirmed).unwrap();
        assert_eq!(workflow.step(), ProcessStep::FabricSelection);
        assert!(workflow.outcome().is_none());

        let jersey = find_fabric("FAB-KNIT-JSY-160").unwrap();
        let step = workflow.handle(WorkflowEvent::FabricSelected(jersey)).unwrap();
        assert_eq!(step, ProcessStep::Validation);

        let outcome = workflow.outcome().unwrap();
        assert_eq!(outcome.readiness.score, 100);
        assert_eq!(workflow.fabric().unwrap().fabric_id, "FAB-KNIT-JSY-160");
    }

    #[test]
    fn test_invalid_event_keeps_state() {
        let mut workflow = Workflow::default();
        let err = workflow.handle(WorkflowEvent::AnalysisConfirmed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot apply 'AnalysisConfirmed' while in 'Uploading'"
        );
        assert_eq!(workflow.state(), &WorkflowState::Uploading);
    }

    #[test]
    fn test_unknown_template_keeps_state() {
        let mut workflow = Workflow::default();
        let err = workflow
            .handle(WorkflowEvent::TemplateSelected("tp-missing".to_string()))
            .unwrap_err();
        assert!(matches!(err, ThreadLogicError::UnknownTemplate(_)));
        assert_eq!(workflow.step(), ProcessStep::Upload);
    }

    #[test]
    fn test_rejected_tech_pack_is_not_bound() {
        let mut tp = template_tech_pack("tp-cargo").unwrap();
        tp.construction.spi = 0;

        let mut workflow = Workflow::default();
        let err = workflow.handle(WorkflowEvent::DocumentParsed(tp)).unwrap_err();
        assert!(matches!(err, ThreadLogicError::InvalidTechPack(_)));
        assert!(workflow.tech_pack().is_none());
    }

    #[test]
    fn test_step_names() {
        assert_eq!(ProcessStep::FabricSelection.to_string(), "FABRIC_SELECTION");
        assert_eq!(
            serde_json::to_string(&ProcessStep::FabricSelection).unwrap(),
            "\"FABRIC_SELECTION\""
        );
    }
}
