use crate::types::MutationRecord;
use serde::Serialize;

/// Which reference list a plot is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Mutations listed by IAS-USA or Stanford HIVdb.
    Drm,
    /// Surveillance drug-resistance mutations.
    Sdrm,
}

/// Display category of a kept mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DrmColor {
    /// Listed by both IAS-USA and Stanford.
    Both,
    /// IAS-USA only.
    SourceA,
    /// Stanford only.
    SourceB,
    Surveillance,
}

impl DrmColor {
    pub fn hex(&self) -> &'static str {
        match self {
            DrmColor::Both => "#bf00bf",
            DrmColor::SourceA => "#0000ff",
            DrmColor::SourceB => "#ff0000",
            DrmColor::Surveillance => "#ff0000",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedMutation {
    pub record: MutationRecord,
    pub color: DrmColor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Mutations(Vec<ClassifiedMutation>),
    NoMutations,
}

impl Classification {
    pub fn len(&self) -> usize {
        match self {
            Classification::Mutations(m) => m.len(),
            Classification::NoMutations => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Color for a record under `mode`, or `None` when the mode drops it.
pub fn color_for(record: &MutationRecord, mode: Mode) -> Option<DrmColor> {
    match mode {
        Mode::Drm => match (record.ias, record.stanford) {
            (true, true) => Some(DrmColor::Both),
            (true, false) => Some(DrmColor::SourceA),
            (false, true) => Some(DrmColor::SourceB),
            (false, false) => None,
        },
        Mode::Sdrm => record.sdrm.then_some(DrmColor::Surveillance),
    }
}

/// Keeps the records relevant to `mode`, in input order, each with its color.
pub fn classify(records: &[MutationRecord], mode: Mode) -> Classification {
    let kept: Vec<ClassifiedMutation> = records
        .iter()
        .filter_map(|record| {
            color_for(record, mode).map(|color| ClassifiedMutation {
                record: record.clone(),
                color,
            })
        })
        .collect();

    tracing::debug!("{:?}: kept {} of {} candidate mutations", mode, kept.len(), records.len());

    if kept.is_empty() {
        Classification::NoMutations
    } else {
        Classification::Mutations(kept)
    }
}
