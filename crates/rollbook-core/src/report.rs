//! Report views: one row per date, one field per configured column,
//! outer-joined on date.
//!
//! A layout lists the columns a sheet shows, e.g. the worship topic, the
//! worship teacher, the hymn pianist. Rows only exist for dates that have at
//! least one value; a column with nothing on a date is simply absent from
//! that row.
//!
//! [`build_report`] pivots one department's sessions. [`build_class_report`]
//! pivots every department at once, one row per date and department, the
//! way the hymn class sheet is laid out.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  assignment::AssignmentDetail,
  schedule::{ClassType, Schedule},
};

/// Separator used when several values land in one cell.
pub const CELL_SEPARATOR: &str = ", ";

// ─── Layout ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportColumn {
  /// The topic of matching sessions.
  Topic {
    label:               String,
    /// Empty matches every class type.
    #[serde(default)]
    class_types:         Vec<ClassType>,
    /// Also emit `<label>_hymn_number`.
    #[serde(default)]
    include_hymn_number: bool,
    /// Also emit `<label>_unit_number`.
    #[serde(default)]
    include_unit_number: bool,
    /// Also emit `<label>_hymn_type`, the hymn type's name.
    #[serde(default)]
    include_hymn_type:   bool,
  },
  /// Who fills `role` in matching sessions.
  Role {
    label:       String,
    #[serde(default)]
    class_types: Vec<ClassType>,
    role:        String,
  },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
  pub columns: Vec<ReportColumn>,
}

impl ReportLayout {
  pub fn column(mut self, column: ReportColumn) -> Self {
    self.columns.push(column);
    self
  }

  /// The class types any column asks for; empty means all of them.
  pub fn class_types(&self) -> Vec<ClassType> {
    let mut types = Vec::new();
    for column in &self.columns {
      let wanted = match column {
        ReportColumn::Topic { class_types, .. } => class_types,
        ReportColumn::Role { class_types, .. } => class_types,
      };
      if wanted.is_empty() {
        return Vec::new();
      }
      types.extend(wanted.iter().copied());
    }
    types.sort();
    types.dedup();
    types
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
  pub date:       NaiveDate,
  /// Set on cross-department reports only.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department: Option<String>,
  pub fields:     BTreeMap<String, String>,
}

/// Names the pivot resolves ids to.
#[derive(Debug, Clone, Default)]
pub struct ReportNames {
  pub departments: HashMap<Uuid, String>,
  pub hymn_types:  HashMap<Uuid, String>,
}

impl ReportNames {
  fn department(&self, id: Uuid) -> String {
    self.departments.get(&id).cloned().unwrap_or_default()
  }

  fn hymn_type(&self, id: Option<Uuid>) -> &str {
    id.and_then(|id| self.hymn_types.get(&id))
      .map(String::as_str)
      .unwrap_or("")
  }
}

fn matches(class_types: &[ClassType], class_type: ClassType) -> bool {
  class_types.is_empty() || class_types.contains(&class_type)
}

/// Append `value` to the cell, joining repeated values. Empty values only
/// ever stand in for an empty cell.
fn push_cell(
  cells: &mut BTreeMap<String, String>,
  key: String,
  value: &str,
) {
  cells
    .entry(key)
    .and_modify(|cell| {
      if value.is_empty() {
        return;
      }
      if !cell.is_empty() {
        cell.push_str(CELL_SEPARATOR);
      }
      cell.push_str(value);
    })
    .or_insert_with(|| value.to_owned());
}

fn pivot<K: Ord>(
  layout: &ReportLayout,
  schedules: &[Schedule],
  assignments: &[AssignmentDetail],
  names: &ReportNames,
  key: impl Fn(&Schedule) -> K,
) -> BTreeMap<K, BTreeMap<String, String>> {
  let mut rows: BTreeMap<K, BTreeMap<String, String>> = BTreeMap::new();

  for column in &layout.columns {
    match column {
      ReportColumn::Topic {
        label,
        class_types,
        include_hymn_number,
        include_unit_number,
        include_hymn_type,
      } => {
        for schedule in schedules.iter().filter(|s| matches(class_types, s.class_type)) {
          let cells = rows.entry(key(schedule)).or_default();
          push_cell(cells, label.clone(), schedule.topic.as_deref().unwrap_or(""));
          if *include_hymn_type {
            push_cell(
              cells,
              format!("{label}_hymn_type"),
              names.hymn_type(schedule.hymn_type_id),
            );
          }
          if *include_hymn_number {
            let number =
              schedule.hymn_number.map(|n| n.to_string()).unwrap_or_default();
            push_cell(cells, format!("{label}_hymn_number"), &number);
          }
          if *include_unit_number {
            push_cell(
              cells,
              format!("{label}_unit_number"),
              schedule.unit_number.as_deref().unwrap_or(""),
            );
          }
        }
      }
      ReportColumn::Role { label, class_types, role } => {
        for detail in assignments.iter().filter(|d| {
          &d.role == role && matches(class_types, d.schedule.class_type)
        }) {
          let cells = rows.entry(key(&detail.schedule)).or_default();
          push_cell(cells, label.clone(), detail.person.as_deref().unwrap_or(""));
        }
      }
    }
  }

  rows
}

/// Pivot one department's schedules and assignments into dated rows.
///
/// Inputs are expected to be pre-filtered to the department; anything else
/// is still pivoted by date, so callers that pass more get more.
pub fn build_report(
  layout: &ReportLayout,
  schedules: &[Schedule],
  assignments: &[AssignmentDetail],
  names: &ReportNames,
) -> Vec<ReportRow> {
  pivot(layout, schedules, assignments, names, |s| s.date)
    .into_iter()
    .map(|(date, fields)| ReportRow { date, department: None, fields })
    .collect()
}

/// Pivot sessions of every department into rows keyed by date and
/// department name.
pub fn build_class_report(
  layout: &ReportLayout,
  schedules: &[Schedule],
  assignments: &[AssignmentDetail],
  names: &ReportNames,
) -> Vec<ReportRow> {
  pivot(layout, schedules, assignments, names, |s| {
    (s.date, names.department(s.department_id))
  })
  .into_iter()
  .map(|((date, department), fields)| ReportRow {
    date,
    department: Some(department),
    fields,
  })
  .collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveTime;
  use uuid::Uuid;

  use super::*;
  use crate::{assignment::RoleAssignment, schedule::NewSchedule};

  fn saturday(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
  }

  fn session(day: u32, class_type: ClassType, topic: &str) -> Schedule {
    let mut new = NewSchedule::new(
      Uuid::nil(),
      saturday(day),
      NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
      NaiveTime::from_hms_opt(14, 35, 0).unwrap(),
      class_type,
    );
    new.topic = Some(topic.into());
    new.into_schedule(Uuid::new_v4())
  }

  fn held(schedule: &Schedule, role: &str, person: Option<&str>) -> AssignmentDetail {
    AssignmentDetail {
      assignment: RoleAssignment {
        assignment_id: Uuid::new_v4(),
        schedule_id:   schedule.schedule_id,
        role_id:       Uuid::nil(),
        person_id:     None,
      },
      schedule:   schedule.clone(),
      department: "Kindergarten".into(),
      role:       role.into(),
      person:     person.map(str::to_owned),
    }
  }

  fn kindergarten_layout() -> ReportLayout {
    ReportLayout::default()
      .column(ReportColumn::Topic {
        label:               "hymn_topic".into(),
        class_types:         vec![ClassType::Hymn],
        include_hymn_number: true,
        include_unit_number: false,
        include_hymn_type:   false,
      })
      .column(ReportColumn::Topic {
        label:               "worship_topic".into(),
        class_types:         vec![ClassType::Worship],
        include_hymn_number: false,
        include_unit_number: true,
        include_hymn_type:   false,
      })
      .column(ReportColumn::Role {
        label:       "worship_teacher".into(),
        class_types: vec![ClassType::Worship],
        role:        "Teacher".into(),
      })
      .column(ReportColumn::Role {
        label:       "hymn_assistant".into(),
        class_types: vec![ClassType::Hymn],
        role:        "Teaching Assistant".into(),
      })
  }

  #[test]
  fn pivots_on_date_with_outer_join() {
    let mut hymn = session(1, ClassType::Hymn, "Praise");
    hymn.hymn_number = Some(12);
    let worship = session(8, ClassType::Worship, "Creation");

    let assignments = vec![
      held(&worship, "Teacher", Some("Alice")),
      held(&hymn, "Teaching Assistant", Some("Bob")),
      held(&hymn, "Teaching Assistant", Some("Carol")),
    ];

    let rows = build_report(
      &kindergarten_layout(),
      &[worship.clone(), hymn.clone()],
      &assignments,
      &ReportNames::default(),
    );
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].date, saturday(1));
    assert_eq!(rows[0].fields["hymn_topic"], "Praise");
    assert_eq!(rows[0].fields["hymn_topic_hymn_number"], "12");
    assert_eq!(rows[0].fields["hymn_assistant"], "Bob, Carol");
    assert!(!rows[0].fields.contains_key("worship_topic"));

    assert_eq!(rows[1].date, saturday(8));
    assert_eq!(rows[1].fields["worship_topic"], "Creation");
    assert_eq!(rows[1].fields["worship_topic_unit_number"], "");
    assert_eq!(rows[1].fields["worship_teacher"], "Alice");
    assert!(!rows[1].fields.contains_key("hymn_topic"));
  }

  #[test]
  fn unassigned_role_renders_empty() {
    let worship = session(1, ClassType::Worship, "Creation");
    let rows = build_report(
      &kindergarten_layout(),
      &[worship.clone()],
      &[held(&worship, "Teacher", None)],
      &ReportNames::default(),
    );
    assert_eq!(rows[0].fields["worship_teacher"], "");
  }

  #[test]
  fn open_slot_does_not_leave_a_stray_separator() {
    let hymn = session(1, ClassType::Hymn, "Praise");
    let assignments = vec![
      held(&hymn, "Teaching Assistant", None),
      held(&hymn, "Teaching Assistant", Some("Bob")),
      held(&hymn, "Teaching Assistant", None),
      held(&hymn, "Teaching Assistant", Some("Carol")),
    ];
    let rows = build_report(
      &kindergarten_layout(),
      &[hymn],
      &assignments,
      &ReportNames::default(),
    );
    assert_eq!(rows[0].fields["hymn_assistant"], "Bob, Carol");
  }

  #[test]
  fn class_report_has_a_row_per_department_and_date() {
    let kindergarten = Uuid::new_v4();
    let juniors = Uuid::new_v4();
    let choir_book = Uuid::new_v4();

    let mut first = session(1, ClassType::Hymn, "Praise");
    first.department_id = kindergarten;
    first.hymn_type_id = Some(choir_book);
    first.hymn_number = Some(12);
    let mut second = session(1, ClassType::Hymn, "Thanks");
    second.department_id = juniors;

    let names = ReportNames {
      departments: HashMap::from([
        (kindergarten, "Kindergarten".to_owned()),
        (juniors, "Juniors".to_owned()),
      ]),
      hymn_types:  HashMap::from([(choir_book, "Choir".to_owned())]),
    };
    let layout = ReportLayout::default()
      .column(ReportColumn::Topic {
        label:               "hymn_topic".into(),
        class_types:         vec![],
        include_hymn_number: true,
        include_unit_number: false,
        include_hymn_type:   true,
      })
      .column(ReportColumn::Role {
        label:       "pianist".into(),
        class_types: vec![],
        role:        "Pianist".into(),
      });

    let rows = build_class_report(
      &layout,
      &[first.clone(), second],
      &[held(&first, "Pianist", Some("Dana"))],
      &names,
    );
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].department.as_deref(), Some("Juniors"));
    assert_eq!(rows[0].fields["hymn_topic"], "Thanks");
    assert_eq!(rows[0].fields["hymn_topic_hymn_type"], "");
    assert!(!rows[0].fields.contains_key("pianist"));

    assert_eq!(rows[1].department.as_deref(), Some("Kindergarten"));
    assert_eq!(rows[1].fields["hymn_topic_hymn_type"], "Choir");
    assert_eq!(rows[1].fields["hymn_topic_hymn_number"], "12");
    assert_eq!(rows[1].fields["pianist"], "Dana");
  }

  #[test]
  fn layout_class_types() {
    assert_eq!(
      kindergarten_layout().class_types(),
      vec![ClassType::Worship, ClassType::Hymn]
    );
    let any = ReportLayout::default().column(ReportColumn::Role {
      label:       "pianist".into(),
      class_types: vec![],
      role:        "Pianist".into(),
    });
    assert!(any.class_types().is_empty());
  }
}
