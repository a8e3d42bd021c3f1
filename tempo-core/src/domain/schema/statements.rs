// tempo-core/src/domain/schema/statements.rs
//
// Static statement catalog for the star schema. Every transformation is a
// fixed mapping from table to query text; nothing is looked up by building
// code or attribute names at runtime.

use crate::domain::error::DomainError;
use crate::domain::project::configuration::{JsonFormat, StorageConfig};
use crate::domain::schema::tables::Table;

/// Double-quote an identifier, doubling embedded quotes.
///
/// Table and column names still come from configuration; quoting keeps
/// plain identifiers safe but callers control the strings themselves.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

// --- DDL ---

pub const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS staging_events (
        artist VARCHAR,
        auth VARCHAR,
        firstname VARCHAR,
        gender VARCHAR,
        iteminsession INTEGER,
        lastname VARCHAR,
        length DOUBLE,
        level VARCHAR,
        location VARCHAR,
        method VARCHAR,
        page VARCHAR,
        registration DOUBLE,
        sessionid INTEGER,
        song VARCHAR,
        status INTEGER,
        ts BIGINT,
        useragent VARCHAR,
        userid INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS staging_songs (
        num_songs INTEGER,
        artist_id VARCHAR,
        artist_latitude DOUBLE,
        artist_longitude DOUBLE,
        artist_location VARCHAR,
        artist_name VARCHAR,
        song_id VARCHAR,
        title VARCHAR,
        duration DOUBLE,
        year INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS songplays (
        playid VARCHAR NOT NULL,
        start_time TIMESTAMP NOT NULL,
        userid INTEGER,
        level VARCHAR,
        songid VARCHAR,
        artistid VARCHAR,
        sessionid INTEGER,
        location VARCHAR,
        useragent VARCHAR
    )",
    "CREATE TABLE IF NOT EXISTS users (
        userid INTEGER NOT NULL,
        firstname VARCHAR,
        lastname VARCHAR,
        gender VARCHAR,
        level VARCHAR
    )",
    "CREATE TABLE IF NOT EXISTS songs (
        songid VARCHAR NOT NULL,
        title VARCHAR,
        artistid VARCHAR,
        year INTEGER,
        duration DOUBLE
    )",
    "CREATE TABLE IF NOT EXISTS artists (
        artistid VARCHAR NOT NULL,
        name VARCHAR,
        location VARCHAR,
        latitude DOUBLE,
        longitude DOUBLE
    )",
    "CREATE TABLE IF NOT EXISTS time (
        start_time TIMESTAMP NOT NULL,
        hour INTEGER,
        day INTEGER,
        week INTEGER,
        month INTEGER,
        year INTEGER,
        weekday INTEGER
    )",
];

// --- TRANSFORMATION SELECTS ---

// The play id is an md5 of (session, timestamp): stable across reruns, so
// truncate-then-load is idempotent while append is at-least-once.
const SONGPLAYS_SELECT: &str = "SELECT
    md5(CAST(events.sessionid AS VARCHAR) || CAST(events.start_time AS VARCHAR)) AS playid,
    events.start_time,
    events.userid,
    events.level,
    songs.song_id AS songid,
    songs.artist_id AS artistid,
    events.sessionid,
    events.location,
    events.useragent
FROM (
    SELECT epoch_ms(ts) AS start_time, *
    FROM staging_events
    WHERE page = 'NextSong'
) events
LEFT JOIN staging_songs songs
    ON events.song = songs.title
    AND events.artist = songs.artist_name
    AND events.length = songs.duration";

// Logged-out plays carry no user id; the dimension only records real users.
const USERS_SELECT: &str = "SELECT DISTINCT userid, firstname, lastname, gender, level
FROM staging_events
WHERE page = 'NextSong' AND userid IS NOT NULL";

const SONGS_SELECT: &str = "SELECT DISTINCT song_id AS songid, title, artist_id AS artistid, year, duration
FROM staging_songs
WHERE song_id IS NOT NULL";

const ARTISTS_SELECT: &str = "SELECT DISTINCT
    artist_id AS artistid,
    artist_name AS name,
    artist_location AS location,
    artist_latitude AS latitude,
    artist_longitude AS longitude
FROM staging_songs
WHERE artist_id IS NOT NULL";

const TIME_SELECT: &str = "SELECT DISTINCT
    start_time,
    EXTRACT(hour FROM start_time) AS hour,
    EXTRACT(day FROM start_time) AS day,
    EXTRACT(week FROM start_time) AS week,
    EXTRACT(month FROM start_time) AS month,
    EXTRACT(year FROM start_time) AS year,
    EXTRACT(dow FROM start_time) AS weekday
FROM songplays";

/// Transformation SELECT for a fact or dimension table.
///
/// Staging tables have no transformation; asking for one is a caller bug
/// surfaced as a domain error, never a silent fallback.
pub fn insert_select(table: Table) -> Result<&'static str, DomainError> {
    match table {
        Table::Songplays => Ok(SONGPLAYS_SELECT),
        Table::Users => Ok(USERS_SELECT),
        Table::Songs => Ok(SONGS_SELECT),
        Table::Artists => Ok(ARTISTS_SELECT),
        Table::Time => Ok(TIME_SELECT),
        Table::StagingEvents | Table::StagingSongs => {
            Err(DomainError::NoInsertStatement(table.name().to_string()))
        }
    }
}

/// Full `INSERT INTO <table> <select>` statement for a fact or dimension.
pub fn insert_into(table: Table) -> Result<String, DomainError> {
    Ok(format!(
        "INSERT INTO {} {}",
        quote_ident(table.name()),
        insert_select(table)?
    ))
}

pub fn truncate(table: &str) -> String {
    format!("TRUNCATE {}", quote_ident(table))
}

/// Bulk load of a JSON source into a staging table.
///
/// `BY NAME` matches source keys to staging columns, so key order in the
/// files does not matter.
pub fn staging_load(table: &str, path: &str, format: JsonFormat) -> String {
    let reader = match format {
        JsonFormat::Auto => format!("read_json_auto({})", quote_literal(path)),
        JsonFormat::NewlineDelimited => format!(
            "read_json({}, format = 'newline_delimited')",
            quote_literal(path)
        ),
    };
    format!(
        "INSERT INTO {} BY NAME SELECT * FROM {}",
        quote_ident(table),
        reader
    )
}

/// Session settings for remote object storage: region plus the fixed
/// credential pair, when configured.
pub fn session_settings(storage: &StorageConfig) -> Vec<String> {
    let mut settings = vec![format!("SET s3_region = {}", quote_literal(&storage.region))];
    if let Some(key) = &storage.access_key_id {
        settings.push(format!("SET s3_access_key_id = {}", quote_literal(key)));
    }
    if let Some(secret) = &storage.secret_access_key {
        settings.push(format!(
            "SET s3_secret_access_key = {}",
            quote_literal(secret)
        ));
    }
    settings
}
