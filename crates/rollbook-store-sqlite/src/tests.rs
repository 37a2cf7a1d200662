//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveTime};
use rollbook_core::{
  assignment::NewAssignment,
  catalog::{CatalogEntry, CatalogKind, Department, NewCatalogEntry, NewDepartment},
  report::{ReportColumn, ReportLayout},
  schedule::{ClassType, NewSchedule, Schedule},
  store::{AssignmentQuery, RosterStore, ScheduleQuery, TeacherQuery},
  teacher::{Gender, NewTeacher, StatusLabel, Teacher, TeacherStatus},
  validate::AssignmentPolicy,
  Rejection,
};
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, day).unwrap() }

fn time(h: u32, m: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, 0).unwrap() }

async fn department(s: &SqliteStore, name: &str) -> Department {
  s.add_department(NewDepartment::named(name)).await.unwrap()
}

async fn role(s: &SqliteStore, name: &str) -> CatalogEntry {
  s.add_catalog_entry(CatalogKind::ClassRole, NewCatalogEntry::named(name))
    .await
    .unwrap()
}

async fn new_teacher(s: &SqliteStore, name: &str) -> Teacher {
  s.add_teacher(NewTeacher {
    name:          name.into(),
    status:        StatusLabel::New,
    department_id: None,
    position_id:   None,
    gender:        Gender::Female,
    region:        None,
  })
  .await
  .unwrap()
}

async fn session(
  s: &SqliteStore,
  department: &Department,
  day: u32,
  (start, end): ((u32, u32), (u32, u32)),
  class_type: ClassType,
) -> Schedule {
  s.create_schedule(NewSchedule::new(
    department.department_id,
    date(day),
    time(start.0, start.1),
    time(end.0, end.1),
    class_type,
  ))
  .await
  .unwrap()
}

fn rejection<T: std::fmt::Debug>(result: Result<T, Error>) -> Rejection {
  match result {
    Err(err) => err.rejection().cloned().expect("a rejection"),
    Ok(v) => panic!("expected a rejection, got {v:?}"),
  }
}

// ─── Departments and catalogs ────────────────────────────────────────────────

#[tokio::test]
async fn add_find_and_list_departments() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  department(&s, "Elementary").await;

  let found = s.find_department("Kindergarten").await.unwrap().unwrap();
  assert_eq!(found, k);
  assert!(s.find_department("Nursery").await.unwrap().is_none());

  let names: Vec<_> =
    s.list_departments().await.unwrap().into_iter().map(|d| d.name).collect();
  assert_eq!(names, vec!["Elementary", "Kindergarten"]);
}

#[tokio::test]
async fn duplicate_department_name_is_taken() {
  let s = store().await;
  department(&s, "Kindergarten").await;

  let err = s
    .add_department(NewDepartment::named("Kindergarten"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NameTaken { entity: "department", .. }));
}

#[tokio::test]
async fn catalogs_are_kept_apart() {
  let s = store().await;
  for kind in CatalogKind::iter() {
    s.add_catalog_entry(kind, NewCatalogEntry::named("Shared name"))
      .await
      .unwrap();
  }
  for kind in CatalogKind::iter() {
    let entries = s.list_catalog(kind).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, kind);
  }

  let err = s
    .add_catalog_entry(CatalogKind::HymnType, NewCatalogEntry::named("Shared name"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NameTaken { entity: "hymn type", .. }));
}

#[tokio::test]
async fn delete_missing_row_is_not_found() {
  let s = store().await;
  let err = s.delete_schedule(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "schedule", .. }));
}

// ─── Teachers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn active_teacher_needs_department_and_position() {
  let s = store().await;
  let result = s
    .add_teacher(NewTeacher {
      name:          "Alice".into(),
      status:        StatusLabel::Active,
      department_id: None,
      position_id:   None,
      gender:        Gender::Female,
      region:        None,
    })
    .await;
  assert!(matches!(rejection(result), Rejection::InvalidTeacherStatus { .. }));
}

#[tokio::test]
async fn teacher_references_must_exist() {
  let s = store().await;
  let position = s
    .add_catalog_entry(CatalogKind::Position, NewCatalogEntry::named("Lead"))
    .await
    .unwrap();

  let err = s
    .add_teacher(NewTeacher {
      name:          "Alice".into(),
      status:        StatusLabel::Active,
      department_id: Some(Uuid::new_v4()),
      position_id:   Some(position.entry_id),
      gender:        Gender::Female,
      region:        None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "department", .. }));
}

#[tokio::test]
async fn update_teacher_changes_status_directly() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let position = s
    .add_catalog_entry(CatalogKind::Position, NewCatalogEntry::named("Lead"))
    .await
    .unwrap();
  let alice = new_teacher(&s, "Alice").await;

  let updated = s
    .update_teacher(alice.teacher_id, NewTeacher {
      name:          "Alice".into(),
      status:        StatusLabel::Active,
      department_id: Some(k.department_id),
      position_id:   Some(position.entry_id),
      gender:        Gender::Female,
      region:        Some("North".into()),
    })
    .await
    .unwrap();
  assert_eq!(updated.status, TeacherStatus::Active {
    department_id: k.department_id,
    position_id:   position.entry_id,
  });

  let fetched = s.get_teacher(alice.teacher_id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);

  let active = s
    .list_teachers(&TeacherQuery {
      status: Some(StatusLabel::Active),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn deleting_department_demotes_active_teachers() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let position = s
    .add_catalog_entry(CatalogKind::Position, NewCatalogEntry::named("Lead"))
    .await
    .unwrap();
  let alice = s
    .add_teacher(NewTeacher {
      name:          "Alice".into(),
      status:        StatusLabel::Active,
      department_id: Some(k.department_id),
      position_id:   Some(position.entry_id),
      gender:        Gender::Female,
      region:        None,
    })
    .await
    .unwrap();
  session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  s.delete_department(k.department_id).await.unwrap();

  let alice = s.get_teacher(alice.teacher_id).await.unwrap().unwrap();
  assert_eq!(alice.status, TeacherStatus::New {
    department_id: None,
    position_id:   Some(position.entry_id),
  });
  let left = s.list_schedules(&ScheduleQuery::default()).await.unwrap();
  assert!(left.is_empty());
}

#[tokio::test]
async fn deleting_position_demotes_active_teachers() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let position = s
    .add_catalog_entry(CatalogKind::Position, NewCatalogEntry::named("Lead"))
    .await
    .unwrap();
  let alice = s
    .add_teacher(NewTeacher {
      name:          "Alice".into(),
      status:        StatusLabel::Active,
      department_id: Some(k.department_id),
      position_id:   Some(position.entry_id),
      gender:        Gender::Female,
      region:        None,
    })
    .await
    .unwrap();

  s.delete_catalog_entry(CatalogKind::Position, position.entry_id)
    .await
    .unwrap();

  let alice = s.get_teacher(alice.teacher_id).await.unwrap().unwrap();
  assert_eq!(alice.status, TeacherStatus::New {
    department_id: Some(k.department_id),
    position_id:   None,
  });
}

#[tokio::test]
async fn deleting_hymn_type_clears_it_from_schedules() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let hymnal = s
    .add_catalog_entry(CatalogKind::HymnType, NewCatalogEntry::named("Hymnal"))
    .await
    .unwrap();
  let mut input = NewSchedule::new(
    k.department_id,
    date(1),
    time(14, 40),
    time(15, 10),
    ClassType::Hymn,
  );
  input.hymn_type_id = Some(hymnal.entry_id);
  input.hymn_number = Some(12);
  let hymn = s.create_schedule(input).await.unwrap();

  s.delete_catalog_entry(CatalogKind::HymnType, hymnal.entry_id)
    .await
    .unwrap();

  let hymn = s.get_schedule(hymn.schedule_id).await.unwrap().unwrap();
  assert_eq!(hymn.hymn_type_id, None);
  assert_eq!(hymn.hymn_number, Some(12));
}

#[tokio::test]
async fn deleting_teacher_keeps_assignment_without_person() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  let a = s
    .assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await
    .unwrap();
  s.delete_teacher(alice.teacher_id).await.unwrap();

  let detail = s.get_assignment(a.assignment_id).await.unwrap().unwrap();
  assert_eq!(detail.assignment.person_id, None);
  assert_eq!(detail.person, None);
}

// ─── Schedules ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn same_slot_twice_is_rejected() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  let again = s
    .create_schedule(NewSchedule::new(
      k.department_id,
      date(1),
      time(14, 0),
      time(14, 35),
      ClassType::Worship,
    ))
    .await;
  assert_eq!(rejection(again), Rejection::ScheduleSlotTaken {
    department_id: k.department_id,
    date:          date(1),
    class_type:    ClassType::Worship,
  });
}

#[tokio::test]
async fn inverted_time_range_is_rejected() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let result = s
    .create_schedule(NewSchedule::new(
      k.department_id,
      date(1),
      time(15, 0),
      time(14, 0),
      ClassType::Hymn,
    ))
    .await;
  assert!(matches!(rejection(result), Rejection::InvalidTimeRange { .. }));
}

#[tokio::test]
async fn update_schedule_cannot_take_an_occupied_slot() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  let hymn = session(&s, &k, 1, ((14, 40), (15, 10)), ClassType::Hymn).await;

  let mut input = NewSchedule::new(
    k.department_id,
    date(1),
    time(14, 40),
    time(15, 10),
    ClassType::Worship,
  );
  input.topic = Some("Moved".into());
  let result = s.update_schedule(hymn.schedule_id, input).await;
  assert!(matches!(rejection(result), Rejection::ScheduleSlotTaken { .. }));

  let unchanged = s.get_schedule(hymn.schedule_id).await.unwrap().unwrap();
  assert_eq!(unchanged, hymn);
}

#[tokio::test]
async fn list_schedules_filters() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let e = department(&s, "Elementary").await;
  session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  session(&s, &k, 1, ((14, 40), (15, 10)), ClassType::Hymn).await;
  session(&s, &k, 8, ((14, 0), (14, 35)), ClassType::Worship).await;
  session(&s, &e, 8, ((14, 0), (14, 35)), ClassType::Worship).await;

  let worship_in_k = s
    .list_schedules(&ScheduleQuery {
      department_id: Some(k.department_id),
      class_types: vec![ClassType::Worship],
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(worship_in_k.len(), 2);

  let on_the_eighth = s
    .list_schedules(&ScheduleQuery {
      from: Some(date(8)),
      to: Some(date(8)),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(on_the_eighth.len(), 2);
}

#[tokio::test]
async fn deleting_schedule_removes_its_assignments() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  let a = s
    .assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await
    .unwrap();

  s.delete_schedule(s1.schedule_id).await.unwrap();
  assert!(s.get_assignment(a.assignment_id).await.unwrap().is_none());
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn sessions_sharing_a_time_slot_are_duplicates() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let worship = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  let hymn = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Hymn).await;

  let result = s
    .assign(NewAssignment::new(hymn.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await;

  match rejection(result) {
    Rejection::DuplicateSchedule { existing, date: on, start, end } => {
      assert_eq!(existing, worship.schedule_id);
      assert_eq!(on, date(1));
      assert_eq!((start, end), (time(14, 0), time(14, 35)));
    }
    other => panic!("unexpected rejection: {other:?}"),
  }
  let held = s.list_assignments(&AssignmentQuery::default()).await.unwrap();
  assert!(held.is_empty());
}

#[tokio::test]
async fn person_cannot_be_in_two_overlapping_sessions() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let e = department(&s, "Elementary").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  let s2 = session(&s, &e, 1, ((14, 20), (14, 50)), ClassType::Worship).await;

  s.assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await
    .unwrap();
  let result = s
    .assign(NewAssignment::new(s2.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await;

  match rejection(result) {
    Rejection::PersonDoubleBooked { person, department, start, end, .. } => {
      assert_eq!(person, "Alice");
      assert_eq!(department, "Kindergarten");
      assert_eq!((start, end), (time(14, 0), time(14, 35)));
    }
    other => panic!("unexpected rejection: {other:?}"),
  }
  let held = s
    .list_assignments(&AssignmentQuery {
      person_id: Some(alice.teacher_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(held.len(), 1);
}

#[tokio::test]
async fn back_to_back_sessions_are_fine() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  let s2 = session(&s, &k, 1, ((14, 35), (15, 0)), ClassType::Hymn).await;

  for schedule in [&s1, &s2] {
    s.assign(NewAssignment::new(
      schedule.schedule_id,
      teacher.entry_id,
      Some(alice.teacher_id),
    ))
    .await
    .unwrap();
  }
}

#[tokio::test]
async fn teaching_assistants_may_share_a_session() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let assistant = role(&s, AssignmentPolicy::DEFAULT_MULTI_FILL_ROLE).await;
  let bob = new_teacher(&s, "Bob").await;
  let carol = new_teacher(&s, "Carol").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  for person in [&bob, &carol] {
    s.assign(NewAssignment::new(
      s1.schedule_id,
      assistant.entry_id,
      Some(person.teacher_id),
    ))
    .await
    .unwrap();
  }

  let filled = s
    .list_assignments(&AssignmentQuery {
      schedule_id: Some(s1.schedule_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(filled.len(), 2);
}

#[tokio::test]
async fn multi_fill_role_follows_the_policy() {
  let s = store()
    .await
    .with_policy(AssignmentPolicy::new("助教"));
  assert_eq!(s.policy().multi_fill_role, "助教");
  let k = department(&s, "Kindergarten").await;
  let assistant = role(&s, AssignmentPolicy::DEFAULT_MULTI_FILL_ROLE).await;
  let bob = new_teacher(&s, "Bob").await;
  let carol = new_teacher(&s, "Carol").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  s.assign(NewAssignment::new(s1.schedule_id, assistant.entry_id, Some(bob.teacher_id)))
    .await
    .unwrap();
  let result = s
    .assign(NewAssignment::new(s1.schedule_id, assistant.entry_id, Some(carol.teacher_id)))
    .await;
  assert!(matches!(rejection(result), Rejection::RoleAlreadyFilled { .. }));
}

#[tokio::test]
async fn single_roles_take_one_person() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let dave = new_teacher(&s, "Dave").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  s.assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await
    .unwrap();
  let result = s
    .assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(dave.teacher_id)))
    .await;

  assert_eq!(rejection(result), Rejection::RoleAlreadyFilled {
    role:        "Teacher".into(),
    schedule_id: s1.schedule_id,
    holder:      Some("Alice".into()),
  });
}

#[tokio::test]
async fn reassign_ignores_the_row_being_edited() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;
  let dave = new_teacher(&s, "Dave").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  let a = s
    .assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(alice.teacher_id)))
    .await
    .unwrap();
  let swapped = s
    .reassign(
      a.assignment_id,
      NewAssignment::new(s1.schedule_id, teacher.entry_id, Some(dave.teacher_id)),
    )
    .await
    .unwrap();
  assert_eq!(swapped.person_id, Some(dave.teacher_id));

  let detail = s.get_assignment(a.assignment_id).await.unwrap().unwrap();
  assert_eq!(detail.person.as_deref(), Some("Dave"));
}

#[tokio::test]
async fn reassign_missing_is_not_found() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  let err = s
    .reassign(Uuid::new_v4(), NewAssignment::new(s1.schedule_id, teacher.entry_id, None))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "assignment", .. }));
}

#[tokio::test]
async fn deleting_class_role_removes_its_assignments() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let s1 = session(&s, &k, 1, ((14, 0), (14, 35)), ClassType::Worship).await;
  s.assign(NewAssignment::new(s1.schedule_id, teacher.entry_id, None))
    .await
    .unwrap();

  s.delete_catalog_entry(CatalogKind::ClassRole, teacher.entry_id)
    .await
    .unwrap();
  let left = s.list_assignments(&AssignmentQuery::default()).await.unwrap();
  assert!(left.is_empty());
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn department_report_pivots_by_date() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let teacher = role(&s, "Teacher").await;
  let alice = new_teacher(&s, "Alice").await;

  let mut worship = NewSchedule::new(
    k.department_id,
    date(1),
    time(14, 0),
    time(14, 35),
    ClassType::Worship,
  );
  worship.topic = Some("Creation".into());
  worship.hymn_number = Some(12);
  let worship = s.create_schedule(worship).await.unwrap();
  session(&s, &k, 8, ((14, 0), (14, 35)), ClassType::Worship).await;
  session(&s, &k, 8, ((14, 40), (15, 10)), ClassType::Hymn).await;

  s.assign(NewAssignment::new(
    worship.schedule_id,
    teacher.entry_id,
    Some(alice.teacher_id),
  ))
  .await
  .unwrap();

  let layout = ReportLayout::default()
    .column(ReportColumn::Topic {
      label:               "worship".into(),
      class_types:         vec![ClassType::Worship],
      include_hymn_number: true,
      include_unit_number: false,
      include_hymn_type:   false,
    })
    .column(ReportColumn::Role {
      label:       "worship_teacher".into(),
      class_types: vec![ClassType::Worship],
      role:        "Teacher".into(),
    });

  let rows = s
    .department_report(k.department_id, &layout)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].date, date(1));
  assert_eq!(rows[0].fields["worship"], "Creation");
  assert_eq!(rows[0].fields["worship_hymn_number"], "12");
  assert_eq!(rows[0].fields["worship_teacher"], "Alice");
  assert_eq!(rows[1].fields["worship"], "");
  assert!(!rows[1].fields.contains_key("worship_teacher"));

  let missing = s
    .department_report(Uuid::new_v4(), &layout)
    .await
    .unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn class_report_spans_departments() {
  let s = store().await;
  let k = department(&s, "Kindergarten").await;
  let e = department(&s, "Elementary").await;
  let pianist = role(&s, "Pianist").await;
  let dana = new_teacher(&s, "Dana").await;
  let hymnal = s
    .add_catalog_entry(CatalogKind::HymnType, NewCatalogEntry::named("Hymnal"))
    .await
    .unwrap();

  let mut input = NewSchedule::new(
    k.department_id,
    date(1),
    time(14, 40),
    time(15, 10),
    ClassType::Hymn,
  );
  input.topic = Some("Praise".into());
  input.hymn_type_id = Some(hymnal.entry_id);
  input.hymn_number = Some(12);
  let k_hymn = s.create_schedule(input).await.unwrap();
  session(&s, &e, 1, ((14, 40), (15, 10)), ClassType::Hymn).await;
  session(&s, &e, 1, ((14, 0), (14, 35)), ClassType::Worship).await;

  s.assign(NewAssignment::new(k_hymn.schedule_id, pianist.entry_id, Some(dana.teacher_id)))
    .await
    .unwrap();

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

  let rows = s.class_report(&[ClassType::Hymn], &layout).await.unwrap();
  assert_eq!(rows.len(), 2);

  assert_eq!(rows[0].department.as_deref(), Some("Elementary"));
  assert_eq!(rows[0].fields["hymn_topic"], "");
  assert_eq!(rows[0].fields["hymn_topic_hymn_type"], "");

  assert_eq!(rows[1].department.as_deref(), Some("Kindergarten"));
  assert_eq!(rows[1].fields["hymn_topic"], "Praise");
  assert_eq!(rows[1].fields["hymn_topic_hymn_type"], "Hymnal");
  assert_eq!(rows[1].fields["hymn_topic_hymn_number"], "12");
  assert_eq!(rows[1].fields["pianist"], "Dana");
}
