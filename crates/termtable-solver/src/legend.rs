//! Legend and teacher annotation

use crate::decompose::TeacherAssignment;
use crate::placement::PlacedUnit;
use std::collections::{BTreeMap, HashMap};
use termtable_core::{ScheduleEntry, Subject, SubjectId, Teacher};

/// Subject id → assigned teacher's display name
pub fn teacher_names(
    teachers: &[Teacher],
    assignment: &TeacherAssignment,
) -> HashMap<SubjectId, String> {
    let names: HashMap<_, _> = teachers.iter().map(|t| (t.id, t.name.as_str())).collect();
    assignment
        .iter()
        .filter_map(|(subject, teacher)| {
            names.get(&teacher).map(|name| (subject, (*name).to_string()))
        })
        .collect()
}

/// Subject name → teacher name for every subject with a resolved teacher
pub fn build_legend(
    subjects: &[Subject],
    teachers: &[Teacher],
    assignment: &TeacherAssignment,
) -> BTreeMap<String, String> {
    let names = teacher_names(teachers, assignment);
    subjects
        .iter()
        .filter_map(|s| names.get(&s.id).map(|teacher| (s.name.clone(), teacher.clone())))
        .collect()
}

/// Attach teacher names to placed rows and unwrap them into schedule entries
pub fn annotate_teachers(
    placed: Vec<PlacedUnit>,
    names: &HashMap<SubjectId, String>,
) -> Vec<ScheduleEntry> {
    placed
        .into_iter()
        .map(|p| {
            let mut entry = p.entry;
            entry.teacher = names.get(&p.subject_id).cloned();
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::assign_teachers;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use termtable_core::{EntryKind, UnitKind};

    #[test]
    fn legend_maps_subject_names() {
        let subjects = vec![Subject::new(1, "Maths"), Subject::new(2, "Physics")];
        let teachers = vec![Teacher::new(10, "Ana"), Teacher::new(20, "Ben")];
        let assignment = assign_teachers(&subjects, &teachers, &BTreeMap::new());
        let legend = build_legend(&subjects, &teachers, &assignment);
        assert_eq!(
            legend,
            BTreeMap::from([
                ("Maths".to_string(), "Ana".to_string()),
                ("Physics".to_string(), "Ben".to_string()),
            ])
        );
    }

    #[test]
    fn no_teachers_means_empty_legend() {
        let subjects = vec![Subject::new(1, "Maths")];
        let assignment = assign_teachers(&subjects, &[], &BTreeMap::new());
        assert!(build_legend(&subjects, &[], &assignment).is_empty());
    }

    #[test]
    fn annotation_uses_subject_identity() {
        let subjects = vec![Subject::new(1, "Maths")];
        let teachers = vec![Teacher::new(10, "Ana")];
        let assignment = assign_teachers(&subjects, &teachers, &BTreeMap::new());
        let names = teacher_names(&teachers, &assignment);

        let placed = vec![PlacedUnit {
            subject_id: 1,
            date_index: 0,
            slot_index: 0,
            room_index: 0,
            entry: ScheduleEntry {
                date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                start_time: "09:00:00".into(),
                end_time: "10:00:00".into(),
                room: "C1".into(),
                subject: "Maths".into(),
                teacher: None,
                kind: EntryKind::Class(UnitKind::Lecture),
                index: 1,
            },
        }];
        let entries = annotate_teachers(placed, &names);
        assert_eq!(entries[0].teacher.as_deref(), Some("Ana"));
    }
}
