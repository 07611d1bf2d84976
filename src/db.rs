use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

use crate::parser::extract::ProviderRecord;

pub const DB_PATH: &str = "data/providers.sqlite";

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS units (
            id           INTEGER PRIMARY KEY,
            source_file  TEXT NOT NULL,
            category     TEXT NOT NULL,
            ordinal      INTEGER NOT NULL,
            text         TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(source_file, category, ordinal)
        );
        CREATE INDEX IF NOT EXISTS idx_units_file ON units(source_file);

        CREATE TABLE IF NOT EXISTS providers (
            id                     INTEGER PRIMARY KEY,
            source_file            TEXT NOT NULL,
            category               TEXT NOT NULL,
            specialty              TEXT,
            first_name             TEXT,
            middle_name            TEXT,
            last_name              TEXT,
            degree                 TEXT,
            gender                 TEXT CHECK(gender IS NULL OR gender IN ('M','F')),
            organization           TEXT,
            group_name             TEXT,
            provider_id            TEXT,
            npi                    TEXT,
            license_number         TEXT,
            address_line           TEXT,
            city                   TEXT,
            state                  TEXT NOT NULL,
            county                 TEXT,
            zip                    TEXT,
            phone                  TEXT,
            languages              TEXT NOT NULL,
            ada_features           TEXT NOT NULL,
            days_hours             TEXT NOT NULL,
            accepting_new_patients BOOLEAN NOT NULL DEFAULT 0,
            hospital_affiliations  TEXT,
            age_group              TEXT,
            areas_of_expertise     TEXT,
            web_address            TEXT,
            created_at             TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_providers_category ON providers(category);
        CREATE INDEX IF NOT EXISTS idx_providers_specialty ON providers(specialty);
        CREATE INDEX IF NOT EXISTS idx_providers_npi ON providers(npi);
        ",
    )?;
    Ok(())
}

/// Replace a job's units and providers in one transaction, so a rerun never duplicates.
pub fn save_job(
    conn: &Connection,
    source_file: &str,
    category: &str,
    units: &[String],
    records: &[ProviderRecord],
) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM units WHERE source_file = ?1 AND category = ?2",
        rusqlite::params![source_file, category],
    )?;
    tx.execute(
        "DELETE FROM providers WHERE source_file = ?1 AND category = ?2",
        rusqlite::params![source_file, category],
    )?;
    {
        let mut u_stmt = tx.prepare(
            "INSERT INTO units (source_file, category, ordinal, text) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (i, text) in units.iter().enumerate() {
            u_stmt.execute(rusqlite::params![source_file, category, i as i64, text])?;
        }

        let mut p_stmt = tx.prepare(
            "INSERT INTO providers
             (source_file, category, specialty, first_name, middle_name, last_name, degree,
              gender, organization, group_name, provider_id, npi, license_number,
              address_line, city, state, county, zip, phone, languages, ada_features,
              days_hours, accepting_new_patients, hospital_affiliations, age_group,
              areas_of_expertise, web_address)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,
                     ?21,?22,?23,?24,?25,?26,?27)",
        )?;
        for r in records {
            p_stmt.execute(rusqlite::params![
                source_file,
                category,
                r.specialty,
                r.first_name,
                r.middle_name,
                r.last_name,
                r.degree,
                r.gender,
                r.organization,
                r.group_name,
                r.provider_id,
                r.npi,
                r.license_number,
                r.address_line,
                r.city,
                r.state,
                r.county,
                r.zip,
                r.phone,
                serde_json::to_string(&r.languages)?,
                serde_json::to_string(&r.ada_features)?,
                r.days_hours,
                r.accepting_new_patients,
                r.hospital_affiliations,
                r.age_group,
                r.areas_of_expertise,
                r.web_address,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Reporting ──

pub struct OverviewRow {
    pub name: String,
    pub degree: String,
    pub category: String,
    pub specialty: String,
    pub city: String,
    pub phone: String,
    pub accepting: bool,
}

pub fn fetch_overview(
    conn: &Connection,
    category: Option<&str>,
    specialty: Option<&str>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let mut sql = String::from(
        "SELECT COALESCE(last_name || ', ' || first_name, '?'),
                COALESCE(degree, ''), category, COALESCE(specialty, ''),
                COALESCE(city, ''), COALESCE(phone, ''), accepting_new_patients
         FROM providers WHERE 1=1",
    );
    let mut params: Vec<String> = Vec::new();
    if let Some(c) = category {
        params.push(c.to_string());
        sql.push_str(&format!(" AND category = ?{}", params.len()));
    }
    if let Some(s) = specialty {
        params.push(format!("%{}%", s));
        sql.push_str(&format!(" AND specialty LIKE ?{}", params.len()));
    }
    sql.push_str(&format!(" ORDER BY category, specialty, last_name LIMIT {}", limit));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok(OverviewRow {
                name: row.get(0)?,
                degree: row.get(1)?,
                category: row.get(2)?,
                specialty: row.get(3)?,
                city: row.get(4)?,
                phone: row.get(5)?,
                accepting: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct Stats {
    pub units: i64,
    pub providers: i64,
    pub accepting: i64,
    pub by_category: Vec<(String, i64)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let units = conn.query_row("SELECT COUNT(*) FROM units", [], |r| r.get(0))?;
    let providers = conn.query_row("SELECT COUNT(*) FROM providers", [], |r| r.get(0))?;
    let accepting = conn.query_row(
        "SELECT COUNT(*) FROM providers WHERE accepting_new_patients = 1",
        [],
        |r| r.get(0),
    )?;
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*) FROM providers GROUP BY category ORDER BY COUNT(*) DESC",
    )?;
    let by_category = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stats {
        units,
        providers,
        accepting,
        by_category,
    })
}
