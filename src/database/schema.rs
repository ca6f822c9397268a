//! SQL DDL for the three record kinds.

pub const CREATE_TABLES: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        faculty TEXT NOT NULL,
        department TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL UNIQUE,
        name TEXT NOT NULL
    )",
    // student_id is not a foreign key; deleting a student leaves its reviews in place
    "CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL,
        staff_id INTEGER NOT NULL,
        experience TEXT NOT NULL,
        rating INTEGER NOT NULL,
        upvotes INTEGER NOT NULL DEFAULT 0,
        downvotes INTEGER NOT NULL DEFAULT 0
    )",
];

pub const DROP_TABLES: [&str; 3] = [
    "DROP TABLE IF EXISTS reviews",
    "DROP TABLE IF EXISTS students",
    "DROP TABLE IF EXISTS users",
];
