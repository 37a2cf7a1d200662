//! SQL schema for the rollbook SQLite store.
//!
//! Executed once at connection startup. Uniqueness and ownership rules live
//! here as constraints; the cross-row assignment rules are enforced by the
//! validation engine inside the write transaction.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS departments (
    department_id TEXT PRIMARY KEY,
    name          TEXT NOT NULL UNIQUE,
    description   TEXT
);

CREATE TABLE IF NOT EXISTS positions (
    entry_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE IF NOT EXISTS class_roles (
    entry_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE IF NOT EXISTS hymn_types (
    entry_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    description TEXT
);

-- Active teachers are demoted to 'new' before their department or position
-- is deleted, so the SET NULL actions never break the status checks.
CREATE TABLE IF NOT EXISTS teachers (
    teacher_id    TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    status        TEXT NOT NULL,   -- 'active' | 'inactive' | 'new'
    department_id TEXT REFERENCES departments(department_id) ON DELETE SET NULL,
    position_id   TEXT REFERENCES positions(entry_id) ON DELETE SET NULL,
    gender        TEXT NOT NULL,   -- 'male' | 'female'
    region        TEXT,
    CHECK (status IN ('active', 'inactive', 'new')),
    CHECK (status != 'active'
           OR (department_id IS NOT NULL AND position_id IS NOT NULL)),
    CHECK (status != 'inactive'
           OR (department_id IS NULL AND position_id IS NULL))
);

CREATE TABLE IF NOT EXISTS schedules (
    schedule_id   TEXT PRIMARY KEY,
    department_id TEXT NOT NULL
                  REFERENCES departments(department_id) ON DELETE CASCADE,
    date          TEXT NOT NULL,   -- YYYY-MM-DD
    start_time    TEXT NOT NULL,   -- HH:MM:SS
    end_time      TEXT NOT NULL,   -- HH:MM:SS
    class_type    TEXT NOT NULL,   -- 'worship' | 'hymn' | 'activity' | 'pianica'
    topic         TEXT,
    unit_number   TEXT,
    hymn_type_id  TEXT REFERENCES hymn_types(entry_id) ON DELETE SET NULL,
    hymn_number   INTEGER,
    UNIQUE (date, department_id, class_type),
    CHECK  (end_time > start_time),
    CHECK  (hymn_number IS NULL OR hymn_number BETWEEN 1 AND 1000)
);

CREATE TABLE IF NOT EXISTS role_assignments (
    assignment_id TEXT PRIMARY KEY,
    schedule_id   TEXT NOT NULL
                  REFERENCES schedules(schedule_id) ON DELETE CASCADE,
    role_id       TEXT NOT NULL
                  REFERENCES class_roles(entry_id) ON DELETE CASCADE,
    person_id     TEXT REFERENCES teachers(teacher_id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS teachers_department_idx    ON teachers(department_id);
CREATE INDEX IF NOT EXISTS schedules_department_idx   ON schedules(department_id, date);
CREATE INDEX IF NOT EXISTS schedules_date_idx         ON schedules(date);
CREATE INDEX IF NOT EXISTS assignments_schedule_idx   ON role_assignments(schedule_id);
CREATE INDEX IF NOT EXISTS assignments_person_idx     ON role_assignments(person_id);

PRAGMA user_version = 1;
";
