//! Categories from the Bluecoins category tables.
//!
//! Bluecoins assigns transactions to child categories, which belong to a
//! parent category, e.g. "Comida" in "Gastos del hogar".

use rusqlite::{Connection, Row};

use crate::{Error, database_id::CategoryId};

/// A child category with the name of its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// The ID of the child category.
    pub id: CategoryId,
    /// The name of the child category.
    pub name: Option<String>,
    /// The name of the parent category, if the parent still exists.
    pub parent_name: Option<String>,
}

impl Category {
    /// The name to show in category selects, e.g. "Gastos del hogar / Comida".
    pub fn display_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("Unknown");

        match &self.parent_name {
            Some(parent_name) => format!("{parent_name} / {name}"),
            None => name.to_owned(),
        }
    }
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_name: row.get(2)?,
    })
}

/// Get all categories ordered by parent name, then name.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT c.categoryTableID, c.childCategoryName, p.parentCategoryName
             FROM CHILDCATEGORYTABLE c
             LEFT JOIN PARENTCATEGORYTABLE p ON p.parentCategoryTableID = c.parentCategoryID
             ORDER BY p.parentCategoryName, c.childCategoryName, c.categoryTableID",
        )?
        .query_map([], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

/// Whether `id` refers to a row in the category table.
pub fn category_exists(id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM CHILDCATEGORYTABLE WHERE categoryTableID = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}
