//! Runs the four content transplants of one migration against the filesystem.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::Filesystem,
        services::{StepReport, StepStatus},
    },
    domain::{
        ArtifactRole, DomainError, MigrationContext, Transplant, TransplantKind,
        transplant::{transplant_component, transplant_core_view, transplant_editor, transplant_properties},
    },
    error::GrafterResult,
};

pub struct Transplanter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> Transplanter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// One transplant per present role, in the order core view, component,
    /// properties, editor.
    #[instrument(skip_all, fields(unit = %ctx.unit()))]
    pub fn run(&self, ctx: &MigrationContext) -> GrafterResult<Vec<StepReport>> {
        let sources = ctx.sources();
        let mut steps = Vec::with_capacity(4);

        let step = match sources.get(ArtifactRole::PlatformOverride) {
            Some(platform) => {
                let platform = self.filesystem.read_to_string(platform)?;
                let core = sources
                    .core_source()
                    .map(|path| self.filesystem.read_to_string(path))
                    .transpose()?;
                self.apply(TransplantKind::CoreView, &ctx.entry_target(), |file, target| {
                    transplant_core_view(file, target, &platform, core.as_deref())
                })?
            }
            None => skipped(TransplantKind::CoreView, ArtifactRole::PlatformOverride),
        };
        steps.push(step);

        let roles = [
            (TransplantKind::Component, ArtifactRole::UiComponent, ctx.component_target()),
            (TransplantKind::Properties, ArtifactRole::DesignProperties, ctx.properties_target()),
            (TransplantKind::Editor, ArtifactRole::DesignEditor, ctx.editor_target()),
        ];
        for (kind, role, target_path) in roles {
            let Some(source) = sources.get(role) else {
                steps.push(skipped(kind, role));
                continue;
            };
            let legacy = self.filesystem.read_to_string(source)?;
            let transplant = match kind {
                TransplantKind::Component => transplant_component,
                TransplantKind::Properties => transplant_properties,
                _ => transplant_editor,
            };
            steps.push(self.apply(kind, &target_path, |file, target| transplant(file, target, &legacy))?);
        }

        Ok(steps)
    }

    fn apply(
        &self,
        kind: TransplantKind,
        target_path: &Path,
        merge: impl FnOnce(&str, &str) -> Result<Transplant, DomainError>,
    ) -> GrafterResult<StepReport> {
        let step = step_name(kind);
        let target = self.filesystem.read_to_string(target_path)?;
        let file = target_path.display().to_string();

        let report = match merge(&file, &target)? {
            Transplant::Applied { content, missing } => {
                self.filesystem.write_file(target_path, &content)?;
                if missing.is_empty() {
                    info!(kind = %kind, file = %file, "Transplanted");
                    StepReport::applied(step)
                } else {
                    for region in &missing {
                        warn!(kind = %kind, file = %file, region, "Region not found, nothing spliced");
                    }
                    StepReport::new(step, StepStatus::Incomplete)
                        .with_detail(format!("not found: {}", missing.join(", ")))
                }
            }
            Transplant::AlreadyMigrated => {
                info!(kind = %kind, file = %file, "Already migrated, skipping");
                StepReport::unchanged(step).with_detail("already migrated")
            }
            Transplant::TargetShapeUnrecognized { region } => {
                warn!(kind = %kind, file = %file, region, "Target has no recognisable region, left unchanged");
                StepReport::skipped(step, format!("target has no {region}"))
            }
            Transplant::SourceShapeUnrecognized { region } => {
                warn!(kind = %kind, file = %file, region, "Legacy source has no recognisable region");
                StepReport::skipped(step, format!("legacy source has no {region}"))
            }
        };
        Ok(report)
    }
}

fn step_name(kind: TransplantKind) -> String {
    format!("transplant {kind}")
}

fn skipped(kind: TransplantKind, role: ArtifactRole) -> StepReport {
    StepReport::skipped(step_name(kind), format!("no {role} source"))
}
