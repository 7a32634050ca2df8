//! Attribute repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup, insert, full scan and search over `attributes` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `find_by_name` is an exact, case-sensitive match.
//! - `search_attributes` is a case-insensitive substring match.
//! - Listings are returned in insertion order.

use crate::db::functions::CONTAINS_CI;
use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::attribute::{Attribute, AttributeId};
use crate::model::name::NameValidationError;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ATTRIBUTE_SELECT_SQL: &str = "SELECT id, name FROM attributes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for attribute persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(NameValidationError),
    Db(DbError),
    /// Storage already holds an attribute with this exact name.
    DuplicateName(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "attribute already exists: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted attribute data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NameValidationError> for RepoError {
    fn from(value: NameValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for attribute storage.
pub trait AttributeRepository {
    /// Returns the attribute whose name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Attribute>>;
    /// Inserts one attribute and returns its ID.
    fn create_attribute(&self, attribute: &Attribute) -> RepoResult<AttributeId>;
    /// Returns every attribute in insertion order.
    fn list_attributes(&self) -> RepoResult<Vec<Attribute>>;
    /// Returns attributes whose name contains `text`, ignoring case.
    fn search_attributes(&self, text: &str) -> RepoResult<Vec<Attribute>>;
}

impl<R: AttributeRepository + ?Sized> AttributeRepository for &R {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Attribute>> {
        (**self).find_by_name(name)
    }

    fn create_attribute(&self, attribute: &Attribute) -> RepoResult<AttributeId> {
        (**self).create_attribute(attribute)
    }

    fn list_attributes(&self) -> RepoResult<Vec<Attribute>> {
        (**self).list_attributes()
    }

    fn search_attributes(&self, text: &str) -> RepoResult<Vec<Attribute>> {
        (**self).search_attributes(text)
    }
}

/// SQLite-backed attribute repository.
pub struct SqliteAttributeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttributeRepository<'conn> {
    /// Constructs a repository from a connection opened via `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the `attributes` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AttributeRepository for SqliteAttributeRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Attribute>> {
        let row = self
            .conn
            .query_row(
                &format!("{ATTRIBUTE_SELECT_SQL} WHERE name = ?1;"),
                [name],
                |row| Ok((row.get::<_, String>("id")?, row.get::<_, String>("name")?)),
            )
            .optional()?;

        row.map(|(id, name)| build_attribute(&id, name)).transpose()
    }

    fn create_attribute(&self, attribute: &Attribute) -> RepoResult<AttributeId> {
        attribute.validate()?;

        self.conn
            .execute(
                "INSERT INTO attributes (id, name) VALUES (?1, ?2);",
                params![attribute.id.to_string(), attribute.name.as_str()],
            )
            .map_err(|err| {
                if is_unique_violation(&err) {
                    RepoError::DuplicateName(attribute.name.clone())
                } else {
                    err.into()
                }
            })?;

        Ok(attribute.id)
    }

    fn list_attributes(&self) -> RepoResult<Vec<Attribute>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATTRIBUTE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut attributes = Vec::new();

        while let Some(row) = rows.next()? {
            attributes.push(parse_attribute_row(row)?);
        }

        Ok(attributes)
    }

    fn search_attributes(&self, text: &str) -> RepoResult<Vec<Attribute>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ATTRIBUTE_SELECT_SQL} WHERE {CONTAINS_CI}(name, ?1) ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([text])?;
        let mut attributes = Vec::new();

        while let Some(row) = rows.next()? {
            attributes.push(parse_attribute_row(row)?);
        }

        Ok(attributes)
    }
}

fn parse_attribute_row(row: &Row<'_>) -> RepoResult<Attribute> {
    let id: String = row.get("id")?;
    build_attribute(&id, row.get("name")?)
}

fn build_attribute(id_text: &str, name: String) -> RepoResult<Attribute> {
    let id = Uuid::parse_str(id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in attributes.id"))
    })?;
    Ok(Attribute::with_id(id, name))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'attributes'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("attributes"));
    }

    Ok(())
}
