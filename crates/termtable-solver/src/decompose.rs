//! Component decomposition
//!
//! Expands subjects into atomic teaching units and fixes one teacher per subject.

use std::collections::{BTreeMap, BTreeSet};
use termtable_core::{Subject, SubjectId, Teacher, TeacherId, TeachingUnit, UnitKind};
use tracing::debug;

/// Expand every subject into one unit per declared hour.
///
/// Units come out grouped by subject, then kind (L, T, P), then 1-based index.
pub fn decompose(subjects: &[Subject]) -> Vec<TeachingUnit> {
    let mut units = Vec::new();
    for subject in subjects {
        for kind in UnitKind::ALL {
            for index in 1..=subject.hours(kind) {
                units.push(TeachingUnit {
                    subject_id: subject.id,
                    subject_name: subject.name.clone(),
                    kind,
                    index,
                });
            }
        }
    }
    units
}

/// Subject → teacher mapping, fixed once computed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeacherAssignment {
    by_subject: BTreeMap<SubjectId, TeacherId>,
}

impl TeacherAssignment {
    pub fn get(&self, subject: SubjectId) -> Option<TeacherId> {
        self.by_subject.get(&subject).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubjectId, TeacherId)> + '_ {
        self.by_subject.iter().map(|(&s, &t)| (s, t))
    }

    pub fn len(&self) -> usize {
        self.by_subject.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }
}

/// Resolve a teacher for every subject.
///
/// An override wins when it names a teacher in the pool. Otherwise the subject
/// gets the lowest-id teacher no other subject holds yet, or the lowest-id
/// teacher overall once the pool is exhausted. An empty pool assigns nothing.
pub fn assign_teachers(
    subjects: &[Subject],
    teachers: &[Teacher],
    overrides: &BTreeMap<SubjectId, TeacherId>,
) -> TeacherAssignment {
    let mut assignment = TeacherAssignment::default();
    let mut pool: Vec<TeacherId> = teachers.iter().map(|t| t.id).collect();
    pool.sort_unstable();
    pool.dedup();

    let Some(&first) = pool.first() else {
        return assignment;
    };

    let mut used: BTreeSet<TeacherId> = BTreeSet::new();
    for subject in subjects {
        let preferred = overrides
            .get(&subject.id)
            .copied()
            .filter(|t| pool.binary_search(t).is_ok());

        let teacher = match preferred {
            Some(teacher) => teacher,
            None => {
                if let Some(&wanted) = overrides.get(&subject.id) {
                    debug!(
                        subject = subject.id,
                        teacher = wanted,
                        "override names unknown teacher, ignoring"
                    );
                }
                pool.iter().copied().find(|t| !used.contains(t)).unwrap_or(first)
            }
        };
        used.insert(teacher);
        assignment.by_subject.insert(subject.id, teacher);
    }
    assignment
}
