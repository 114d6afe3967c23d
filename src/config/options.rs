//! The Monocle option table
//!
//! Every option the scanner, web frontend and notifier read, with the value
//! types each accepts and its default. Options without a default are
//! required: reading them without supplying them fails.
//!
//! A few defaults depend on the installation: the worker count derived from
//! `GRID` and the install directory used as `INSTANCE_ID`.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::config::raw::RawConfig;
use crate::config::schema::{
    ADDRESS, Expected, PATH, SEQUENCE, SET_SEQUENCE, SET_SEQUENCE_RANGE, STR_OR_SET_SEQUENCE,
    Schema,
};
use crate::config::value::{Value, ValueType};
use crate::error::SchemaError;

const ANY: Expected = Expected::Any;
const BOOL: Expected = Expected::Exactly(ValueType::Bool);
const BYTES: Expected = Expected::Exactly(ValueType::Bytes);
const DICT: Expected = Expected::Exactly(ValueType::Dict);
const INT: Expected = Expected::Exactly(ValueType::Int);
const NUMBER: Expected = Expected::Number;
const STR: Expected = Expected::Exactly(ValueType::Str);
const TIMESTAMP: Expected = Expected::Exactly(ValueType::Timestamp);
const ANY_PATH: Expected = Expected::OneOf(PATH);
const SEQ: Expected = Expected::OneOf(SEQUENCE);
const SET_SEQ: Expected = Expected::OneOf(SET_SEQUENCE);
const SET_SEQ_RANGE: Expected = Expected::OneOf(SET_SEQUENCE_RANGE);
const STR_OR_SET_SEQ: Expected = Expected::OneOf(STR_OR_SET_SEQUENCE);

const OSM_TILES: &str = "//{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const ICON_BASE: &str = "https://raw.githubusercontent.com/M4d40/my-po-icons/master";

/// Seconds of scanning an account works before it is swapped out, spread
/// across all workers.
const SWAP_WINDOW_SECS: f64 = 21600.0;

// ============================================================================
// Host Context
// ============================================================================

/// Installation facts that some defaults are computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// Directory Monocle is installed in
    pub install_dir: PathBuf,

    /// Number of scanning workers, `GRID[0] * GRID[1]`
    pub worker_count: Option<u32>,
}

impl HostContext {
    /// Derives the context from the raw configuration.
    ///
    /// `worker_count` is `None` unless `GRID` is a tuple or list whose first
    /// two elements are positive integers.
    #[must_use]
    pub fn from_raw(raw: &RawConfig, install_dir: impl Into<PathBuf>) -> Self {
        let worker_count = raw.get("GRID").and_then(grid_worker_count);
        if worker_count.is_none() {
            tracing::debug!("GRID missing or malformed, worker-derived defaults disabled");
        }
        Self {
            install_dir: install_dir.into(),
            worker_count,
        }
    }

    /// Context for an install directory with a known worker count.
    #[must_use]
    pub fn new(install_dir: impl Into<PathBuf>, worker_count: Option<u32>) -> Self {
        Self {
            install_dir: install_dir.into(),
            worker_count,
        }
    }
}

fn grid_worker_count(grid: &Value) -> Option<u32> {
    let [rows, cols, ..] = grid.as_sequence()? else {
        return None;
    };
    let rows = u32::try_from(rows.as_int()?).ok()?;
    let cols = u32::try_from(cols.as_int()?).ok()?;
    rows.checked_mul(cols).filter(|count| *count > 0)
}

fn install_dir_string(dir: &Path) -> String {
    dir.display().to_string()
}

// ============================================================================
// Table
// ============================================================================

/// Builds the Monocle schema for the given installation.
///
/// # Errors
///
/// Returns a [`SchemaError`] if the table is inconsistent.
#[allow(clippy::too_many_lines)]
pub fn monocle_schema(host: &HostContext) -> Result<Schema, SchemaError> {
    let builder = Schema::builder()
        .option("ACCOUNTS", SET_SEQ)
        .option("ACCOUNTS_CSV", ANY_PATH)
        .option("ACCOUNTS_SWAP_OUT_ON_WARN", BOOL)
        .option("ACCOUNTS_HIBERNATE_CONFIG", DICT)
        .option("ALT_PRECISION", INT)
        .option("ALT_RANGE", SEQ)
        .option("ALWAYS_NOTIFY", INT)
        .option("ALWAYS_NOTIFY_IDS", SET_SEQ_RANGE)
        .option("ANNOUNCEMENTS", STR)
        .option("APP_SIMULATION", BOOL)
        .option("AREA_NAME", STR)
        .option("AUTHKEY", BYTES)
        .option("BALANCE", STR)
        .option("BOOTSTRAP_RADIUS", NUMBER)
        .option("BOUNDARIES", ANY)
        .option("CACHE_CELLS", BOOL)
        .option("CAPTCHAS_ALLOWED", INT)
        .option("CAPTCHA_KEY", STR)
        .option("CLEANUP_LIMIT", INT)
        .option("CLEANUP_RAIDS_OLDER_THAN_X_HR", NUMBER)
        .option("CLEANUP_SIGHTINGS_OLDER_THAN_X_HR", NUMBER)
        .option("CLEANUP_FORT_SIGHTINGS_OLDER_THAN_X_HR", NUMBER)
        .option("CLEANUP_MYSTERY_SIGHTINGS_OLDER_THAN_X_HR", NUMBER)
        .option("COMPLETE_TUTORIAL", BOOL)
        .option("COROUTINES_LIMIT", INT)
        .option("DARK_MAP_OPACITY", NUMBER)
        .option("DARK_MAP_PROVIDER_ATTRIBUTION", STR)
        .option("DARK_MAP_PROVIDER_URL", STR)
        .option("DB", DICT)
        .option("DB_ENGINE", STR)
        .option("DB_POOL_RECYCLE", NUMBER)
        .option("DB_POOL_SIZE", NUMBER)
        .option("DB_MAX_OVERFLOW", NUMBER)
        .option("DIRECTORY", ANY_PATH)
        .option("DISCORD_INVITE_ID", STR)
        .option("DISPLAY_BOOSTED_FEATURE", BOOL)
        .option("ENCOUNTER", STR)
        .option("ENCOUNTER_IDS", SET_SEQ_RANGE)
        .option("EXTRA_ACCOUNT_PERCENT", NUMBER)
        .option("FAILURES_ALLOWED", INT)
        .option("FAVOR_CAPTCHA", BOOL)
        .option("FB_PAGE_ID", STR)
        .option("FIXED_OPACITY", BOOL)
        .option("FORCED_KILL", BOOL)
        .option("FORCE_SPLASH", BOOL)
        .option("FULL_TIME", NUMBER)
        .option("FUNDING_GOAL", STR)
        .option("GIVE_UP_KNOWN", NUMBER)
        .option("GIVE_UP_UNKNOWN", NUMBER)
        .option("GOOD_ENOUGH", NUMBER)
        .option("GOOGLE_MAPS_KEY", STR_OR_SET_SEQ)
        .option("GRID", SEQ)
        .option("HASHTAGS", SET_SEQ)
        .option("HASH_KEY", STR_OR_SET_SEQ)
        .option("HASH_ENDPOINT", STR)
        .option("IV_NOTE", STR)
        .option("GO_HASH", BOOL)
        .option("GOHASH_ENDPOINT", STR)
        .option("GO_HASH_KEY", STR_OR_SET_SEQ)
        .option("HEATMAP", BOOL)
        .option("HIBERNATE_WEBHOOK", STR)
        .option("HIBERNATE_WEBHOOK_MIN_LEVEL", NUMBER)
        .option("ICONS_URL", STR)
        .option("EGG_ICONS_URL", STR)
        .option("GMAP_ICONS_URL", STR)
        .option("GMAP_EGG_ICONS_URL", STR)
        .option("IGNORE_IVS", BOOL)
        .option("IGNORE_RARITY", BOOL)
        .option("IMAGE_STATS", BOOL)
        .option("INCUBATE_EGGS", BOOL)
        .option("INITIAL_SCORE", NUMBER)
        .option("INSTANCE_ID", STR)
        .option("ITEM_LIMITS", DICT)
        .option("IV_FONT", STR)
        .option("KEEP_GYM_HISTORY", BOOL)
        .option("KEEP_SPAWNPOINT_HISTORY", BOOL)
        .option("LANDMARKS", ANY)
        .option("LANGUAGE", STR)
        .option("LAST_MIGRATION", NUMBER)
        .option("LEGENDARY_RAID_POKEMON_ID", NUMBER)
        .option("LEGENDARY_RAID_CP", NUMBER)
        .option("LIGHT_MAP_OPACITY", NUMBER)
        .option("LIGHT_MAP_PROVIDER_ATTRIBUTION", STR)
        .option("LIGHT_MAP_PROVIDER_URL", STR)
        .option("LOAD_CUSTOM_CSS_FILE", BOOL)
        .option("LOAD_CUSTOM_HTML_FILE", BOOL)
        .option("LOAD_CUSTOM_JS_FILE", BOOL)
        .option("LOGGED_FILES", NUMBER)
        .option("LOGGED_SIZE", NUMBER)
        .option("LOGIN_TIMEOUT", NUMBER)
        .option("LV30_PERCENT_OF_WORKERS", NUMBER)
        .option("LV30_ENCOUNTER_WAIT", NUMBER)
        .option("LV30_GMO", BOOL)
        .option("LV30_MAX_QUEUE", INT)
        .option("LV30_MAX_SPEED", NUMBER)
        .option("MANAGER_ADDRESS", Expected::OneOf(ADDRESS))
        .option("MAP_END", SEQ)
        .option("MAP_FILTER_IDS", SEQ)
        .option("MAP_PROVIDER_ATTRIBUTION", STR)
        .option("MAP_PROVIDER_URL", STR)
        .option("MAP_SHOW_DETAILS", BOOL)
        .option("MAP_START", SEQ)
        .option("MAP_WORKERS", BOOL)
        .option("MAX_CAPTCHAS", INT)
        .option("MAX_RETRIES", INT)
        .option("MINIMUM_RUNTIME", NUMBER)
        .option("MINIMUM_SCORE", NUMBER)
        .option("MORE_POINTS", BOOL)
        .option("MOTD", STR)
        .option("MOVE_FONT", STR)
        .option("NAME_FONT", STR)
        .option("NEVER_NOTIFY_IDS", SET_SEQ_RANGE)
        .option("NO_DB_INSERT_IDS", SET_SEQ_RANGE)
        .option("NOTIFY", BOOL)
        .option("NOTIFY_GYMS_WEBHOOK", BOOL)
        .option("NOTIFY_EGGS", BOOL)
        .option("NOTIFY_RAIDS", BOOL)
        .option("NOTIFY_RAIDS_WEBHOOK", BOOL)
        .option("NOTIFY_IDS", SET_SEQ_RANGE)
        .option("NOTIFY_RANKING", INT)
        .option("NOTIFY_WEATHER", BOOL)
        .option("PARK_CHECK", BOOL)
        .option("PASS", STR)
        .option("PAYPAL_URL", STR)
        .option("PAYPAL_BUTTON_CODE", STR)
        .option("PB_API_KEY", STR)
        .option("PB_CHANNEL", INT)
        .option("PGSCOUT_ENDPOINT", SET_SEQ)
        .option("PGSCOUT_TIMEOUT", INT)
        .option("PLAYER_LOCALE", DICT)
        .option("POGOSD_REGION", STR)
        .option("PROVIDER", STR)
        .option("PROXIES", SET_SEQ)
        .option("PULL_GYM_NAME", BOOL)
        .option("RAIDERS_PER_GYM", NUMBER)
        .option("POKEMON_ALARMS", DICT)
        .option("DEFAULT_ALARM", DICT)
        .option("RAIDS_FILTER", SET_SEQ_RANGE)
        .option("TELEGRAM_RAIDS_FILTER", SET_SEQ_RANGE)
        .option("TELEGRAM_RAIDS_LVL_MIN", INT)
        .option("TELEGRAM_RAIDS_IDS", SET_SEQ_RANGE)
        .option("RAID_ALARMS", DICT)
        .option("DEFAULT_EGG_ALARM", DICT)
        .option("DEFAULT_RAID_ALARM", DICT)
        .option("RAID_IDS", SET_SEQ_RANGE)
        .option("RARE_IDS", SET_SEQ_RANGE)
        .option("RARITY_OVERRIDE", DICT)
        .option("REFRESH_RATE", NUMBER)
        .option("REPORT_MAPS", BOOL)
        .option("REPORT_SINCE", TIMESTAMP)
        .option("RESCAN_UNKNOWN", NUMBER)
        .option("SB_DETECTOR", BOOL)
        .option("SB_COMMON_POKEMON_IDS", SET_SEQ)
        .option("SB_MAX_ENC_MISS", NUMBER)
        .option("SB_MIN_SIGHTING_COUNT", NUMBER)
        .option("SB_QUARANTINE_VISITS", NUMBER)
        .option("SCAN_DELAY", NUMBER)
        .option("SCAN_LOG_WEBHOOK", STR)
        .option("SEARCH_SLEEP", NUMBER)
        .option("SHOW_FORM", BOOL)
        .option("SHOW_FORM_MENU_ITEM", BOOL)
        .option("SHOW_RAID_TIMER", BOOL)
        .option("SHOW_SPLASH", BOOL)
        .option("SPLASH_MESSAGE", STR)
        .option("SHOW_TIMER", BOOL)
        .option("SHOW_TIMER_RAIDS", BOOL)
        .option("SHOW_IV", BOOL)
        .option("SHOW_EX_GYMS_BY_DEFAULT", BOOL)
        .option("SHOW_FILTERED_POKEMON_BY_DEFAULT", BOOL)
        .option("SHOW_PARKS_IN_S2_CELLS_BY_DEFAULT", BOOL)
        .option("SHOW_POKEMON_BY_DEFAULT", BOOL)
        .option("SHOW_GYMS_BY_DEFAULT", BOOL)
        .option("SHOW_RAIDS_BY_DEFAULT", BOOL)
        .option("SHOW_SCAN_AREA_BY_DEFAULT", BOOL)
        .option("SHOW_SPAWNPOINTS_BY_DEFAULT", BOOL)
        .option("SHOW_WEATHER_BY_DEFAULT", BOOL)
        .option("SIMULTANEOUS_LOGINS", INT)
        .option("SIMULTANEOUS_SIMULATION", INT)
        .option("SKIP_SPAWN", NUMBER)
        .option("SMART_THROTTLE", NUMBER)
        .option("SPEED_LIMIT", NUMBER)
        .option("SPEED_UNIT", STR)
        .option("SPIN_COOLDOWN", NUMBER)
        .option("SPIN_POKESTOPS", BOOL)
        .option("GYM_NAMES", BOOL)
        .option("GYM_DEFENDERS", BOOL)
        .option("STAT_REFRESH", NUMBER)
        .option("SWAP_OLDEST", NUMBER)
        .option("TEAM", DICT)
        .option("TELEGRAM_BOT_TOKEN", STR)
        .option("TELEGRAM_CHAT_ID", STR)
        .option("TELEGRAM_MESSAGE_TYPE", NUMBER)
        .option("TELEGRAM_RAIDS_CHAT_ID", STR)
        .option("TELEGRAM_USERNAME", STR)
        .option("TICKER_ITEMS", STR)
        .option("TICKER_COLOR", STR)
        .option("TIME_REQUIRED", NUMBER)
        .option("TRASH_IDS", SET_SEQ_RANGE)
        .option("TWEET_IMAGES", BOOL)
        .option("TWITTER_ACCESS_KEY", STR)
        .option("TWITTER_ACCESS_SECRET", STR)
        .option("TWITTER_CONSUMER_KEY", STR)
        .option("TWITTER_CONSUMER_SECRET", STR)
        .option("TWITTER_SCREEN_NAME", STR)
        .option("TZ_OFFSET", NUMBER)
        .option("USE_ANTICAPTCHA", BOOL)
        .option("UVLOOP", BOOL)
        .option("WEBHOOKS", SET_SEQ)
        .option("WEATHER_STATUS", DICT)
        .option("WEBHOOK_GYM_MAPPING", DICT)
        .option("WEBHOOK_RAID_MAPPING", DICT);

    let builder = builder
        .with_default("ACCOUNTS", Value::None)
        .with_default("ACCOUNTS_CSV", Value::None)
        .with_default("ACCOUNTS_SWAP_OUT_ON_WARN", true)
        .with_default(
            "ACCOUNTS_HIBERNATE_CONFIG",
            Value::dict([
                ("banned", 45.0),
                ("warn", 45.0),
                ("sbanned", 45.0),
                ("code3", 45.0),
                ("tempdisabled", 0.020_833_333_33),
            ]),
        )
        .with_default("ALT_PRECISION", 2)
        .with_default("ALT_RANGE", Value::tuple([300, 400]))
        .with_default("ALWAYS_NOTIFY", 0)
        .with_default("ALWAYS_NOTIFY_IDS", Value::set(Vec::<i64>::new()))
        .with_default("ANNOUNCEMENTS", Value::None)
        .with_default("APP_SIMULATION", true)
        .with_default("AREA_NAME", "Area")
        .with_default("AUTHKEY", Value::Bytes(b"m3wtw0".to_vec()))
        .with_default("BALANCE", Value::None)
        .with_default("BOOTSTRAP_RADIUS", 120)
        .with_default("BOUNDARIES", Value::None)
        .with_default("CACHE_CELLS", false)
        .with_default("CAPTCHAS_ALLOWED", 3)
        .with_default("CAPTCHA_KEY", Value::None)
        .with_default("CLEANUP_LIMIT", 100_000)
        .with_default("CLEANUP_RAIDS_OLDER_THAN_X_HR", 4.0)
        .with_default("CLEANUP_SIGHTINGS_OLDER_THAN_X_HR", 4.0)
        .with_default("CLEANUP_FORT_SIGHTINGS_OLDER_THAN_X_HR", 4.0)
        .with_default("CLEANUP_MYSTERY_SIGHTINGS_OLDER_THAN_X_HR", 48.0)
        .with_default("COMPLETE_TUTORIAL", false)
        .with_default("DARK_MAP_OPACITY", 1.0)
        .with_default("DARK_MAP_PROVIDER_ATTRIBUTION", OSM_ATTRIBUTION)
        .with_default("DARK_MAP_PROVIDER_URL", OSM_TILES)
        .with_default("DB_POOL_RECYCLE", 299)
        .with_default("DB_POOL_SIZE", 5)
        .with_default("DB_MAX_OVERFLOW", 10)
        .with_default("DIRECTORY", ".")
        .with_default("DISCORD_INVITE_ID", Value::None)
        .with_default("DISPLAY_BOOSTED_FEATURE", true)
        .with_default("ENCOUNTER", Value::None)
        .with_default("ENCOUNTER_IDS", Value::None)
        .with_default("EXTRA_ACCOUNT_PERCENT", 0.0)
        .with_default("FAVOR_CAPTCHA", true)
        .with_default("FAILURES_ALLOWED", 3)
        .with_default("FB_PAGE_ID", Value::None)
        .with_default("FIXED_OPACITY", false)
        .with_default("FORCED_KILL", Value::None)
        .with_default("FORCE_SPLASH", false)
        .with_default("FULL_TIME", 1800)
        .with_default("FUNDING_GOAL", Value::None)
        .with_default("GIVE_UP_KNOWN", 300)
        .with_default("GIVE_UP_UNKNOWN", 1500)
        .with_default("GO_HASH", false)
        .with_default("GOHASH_ENDPOINT", "http://hash.gomanager.biz")
        .with_default("HASH_ENDPOINT", "http://pokehash.buddyauth.com")
        .with_default("GOOD_ENOUGH", 0.1)
        .with_default("GOOGLE_MAPS_KEY", "")
        .with_default("HASHTAGS", Value::None)
        .with_default("HIBERNATE_WEBHOOK", Value::None)
        .with_default("HIBERNATE_WEBHOOK_MIN_LEVEL", 1)
        .with_default("ICONS_URL", "")
        .with_default(
            "EGG_ICONS_URL",
            format!("{ICON_BASE}/Original-Assets/egg_{{}}.png"),
        )
        .with_default(
            "GMAP_ICONS_URL",
            format!("{ICON_BASE}/Original-Assets-16x16/{{}}.png"),
        )
        .with_default(
            "GMAP_EGG_ICONS_URL",
            format!("{ICON_BASE}/Original-Assets-16x16/egg_{{}}.png"),
        )
        .with_default("IGNORE_IVS", false)
        .with_default("IGNORE_RARITY", false)
        .with_default("IMAGE_STATS", false)
        .with_default("INCUBATE_EGGS", true)
        .with_default("INSTANCE_ID", install_dir_string(&host.install_dir))
        .with_default("ITEM_LIMITS", Value::None)
        .with_default("IV_FONT", "monospace")
        .with_default("IV_NOTE", Value::None)
        .with_default("KEEP_GYM_HISTORY", false)
        .with_default("KEEP_SPAWNPOINT_HISTORY", true)
        .with_default("LANDMARKS", Value::None)
        .with_default("LANGUAGE", "EN")
        .with_default("LAST_MIGRATION", 1_481_932_800)
        .with_default("LEGENDARY_RAID_POKEMON_ID", 0)
        .with_default("LEGENDARY_RAID_CP", 0)
        .with_default("LIGHT_MAP_OPACITY", 1.0)
        .with_default("LIGHT_MAP_PROVIDER_ATTRIBUTION", OSM_ATTRIBUTION)
        .with_default("LIGHT_MAP_PROVIDER_URL", OSM_TILES)
        .with_default("LOAD_CUSTOM_CSS_FILE", false)
        .with_default("LOAD_CUSTOM_HTML_FILE", false)
        .with_default("LOAD_CUSTOM_JS_FILE", false)
        .with_default("LOGGED_FILES", 4)
        .with_default("LOGGED_SIZE", 500_000)
        .with_default("LOGIN_TIMEOUT", 2.5)
        .with_default("LV30_PERCENT_OF_WORKERS", 0.0)
        .with_default("LV30_ENCOUNTER_WAIT", 0.0)
        .with_default("LV30_GMO", false)
        .with_default("LV30_MAX_QUEUE", 0)
        .with_default("LV30_MAX_SPEED", 0.0)
        .with_default("MANAGER_ADDRESS", Value::None)
        .with_default("MAP_FILTER_IDS", Value::None)
        .with_default("MAP_PROVIDER_URL", OSM_TILES)
        .with_default("MAP_PROVIDER_ATTRIBUTION", OSM_ATTRIBUTION)
        .with_default("MAP_SHOW_DETAILS", true)
        .with_default("MAP_WORKERS", true)
        .with_default("MAX_CAPTCHAS", 0)
        .with_default("MAX_RETRIES", 3)
        .with_default("MINIMUM_RUNTIME", 10)
        .with_default("MORE_POINTS", false)
        .with_default("MOTD", Value::None)
        .with_default("MOVE_FONT", "sans-serif")
        .with_default("NAME_FONT", "sans-serif")
        .with_default("NEVER_NOTIFY_IDS", Value::Tuple(Vec::new()))
        .with_default("NO_DB_INSERT_IDS", Value::None)
        .with_default("NOTIFY", false)
        .with_default("NOTIFY_GYMS_WEBHOOK", false)
        .with_default("NOTIFY_EGGS", false)
        .with_default("NOTIFY_RAIDS", false)
        .with_default("NOTIFY_RAIDS_WEBHOOK", true)
        .with_default("NOTIFY_IDS", Value::None)
        .with_default("NOTIFY_RANKING", Value::None)
        .with_default("PARK_CHECK", true)
        .with_default("NOTIFY_WEATHER", true)
        .with_default("PASS", Value::None)
        .with_default("PAYPAL_URL", Value::None)
        .with_default("PAYPAL_BUTTON_CODE", Value::None)
        .with_default("PB_API_KEY", Value::None)
        .with_default("PB_CHANNEL", Value::None)
        .with_default("PGSCOUT_ENDPOINT", Value::None)
        .with_default("PGSCOUT_TIMEOUT", 40)
        .with_default(
            "PLAYER_LOCALE",
            Value::dict([
                ("country", "US"),
                ("language", "en"),
                ("timezone", "America/Denver"),
            ]),
        )
        .with_default("PROVIDER", Value::None)
        .with_default("PROXIES", Value::None)
        .with_default("PULL_GYM_NAME", false)
        .with_default("RAIDERS_PER_GYM", 0.0)
        .with_default("POKEMON_ALARMS", Value::Dict(IndexMap::new()))
        .with_default("RAID_ALARMS", Value::Dict(IndexMap::new()))
        .with_default("RAIDS_FILTER", Value::tuple([3, 4, 5]))
        .with_default("RAID_IDS", Value::Tuple(Vec::new()))
        .with_default("TELEGRAM_RAIDS_FILTER", Value::tuple([3, 4, 5]))
        .with_default("TELEGRAM_RAIDS_LVL_MIN", 4)
        .with_default("RARE_IDS", Value::Tuple(Vec::new()))
        .with_default("RARITY_OVERRIDE", Value::Dict(IndexMap::new()))
        .with_default("REFRESH_RATE", 0.6)
        .with_default("REPORT_MAPS", true)
        .with_default("REPORT_SINCE", Value::None)
        .with_default("RESCAN_UNKNOWN", 90)
        .with_default("SB_DETECTOR", true)
        .with_default(
            "SB_COMMON_POKEMON_IDS",
            Value::tuple([
                16, 19, 23, 27, 29, 32, 43, 46, 52, 54, 60, 69, 77, 81, 98, 118, 120, 129, 177,
                183, 187, 191, 194, 209, 218, 293, 304, 320, 325, 339,
            ]),
        )
        .with_default("SB_MAX_ENC_MISS", 3)
        .with_default("SB_MIN_SIGHTING_COUNT", 30)
        .with_default("SB_QUARANTINE_VISITS", 12)
        .with_default("SCAN_DELAY", 10)
        .with_default("SCAN_LOG_WEBHOOK", Value::None)
        .with_default("SEARCH_SLEEP", 2.5)
        .with_default("SHOW_FORM", true)
        .with_default("SHOW_FORM_MENU_ITEM", false)
        .with_default("SHOW_RAID_TIMER", false)
        .with_default("SHOW_SPLASH", true)
        .with_default("SPLASH_MESSAGE", Value::None)
        .with_default("SHOW_TIMER", false)
        .with_default("SHOW_IV", false)
        .with_default("SHOW_EX_GYMS_BY_DEFAULT", false)
        .with_default("SHOW_FILTERED_POKEMON_BY_DEFAULT", false)
        .with_default("SHOW_PARKS_IN_S2_CELLS_BY_DEFAULT", false)
        .with_default("SHOW_POKEMON_BY_DEFAULT", true)
        .with_default("SHOW_GYMS_BY_DEFAULT", false)
        .with_default("SHOW_RAIDS_BY_DEFAULT", false)
        .with_default("SHOW_SCAN_AREA_BY_DEFAULT", true)
        .with_default("SHOW_SPAWNPOINTS_BY_DEFAULT", false)
        .with_default("SHOW_WEATHER_BY_DEFAULT", false)
        .with_default("SHOW_TIMER_RAIDS", false)
        .with_default("SIMULTANEOUS_LOGINS", 2)
        .with_default("SIMULTANEOUS_SIMULATION", 4)
        .with_default("SKIP_SPAWN", 1500)
        .with_default("SMART_THROTTLE", false)
        .with_default("SPEED_LIMIT", 19.5)
        .with_default("SPEED_UNIT", "miles")
        .with_default("SPIN_COOLDOWN", 300)
        .with_default("SPIN_POKESTOPS", true)
        .with_default("GYM_NAMES", true)
        .with_default("GYM_DEFENDERS", true)
        .with_default("STAT_REFRESH", 5)
        .with_default(
            "TEAM",
            Value::dict([
                (0, "No Team"),
                (1, "Mystic (blue)"),
                (2, "Valor (red)"),
                (3, "Instinct (yellow)"),
            ]),
        )
        .with_default("TELEGRAM_BOT_TOKEN", Value::None)
        .with_default("TELEGRAM_CHAT_ID", Value::None)
        .with_default("TELEGRAM_MESSAGE_TYPE", 0)
        .with_default("TELEGRAM_RAIDS_CHAT_ID", Value::None)
        .with_default("TELEGRAM_USERNAME", Value::None)
        .with_default("TICKER_ITEMS", Value::None)
        .with_default("TICKER_COLOR", "red")
        .with_default("TIME_REQUIRED", 300)
        .with_default("TRASH_IDS", Value::Tuple(Vec::new()))
        .with_default("TWEET_IMAGES", false)
        .with_default("TWITTER_ACCESS_KEY", Value::None)
        .with_default("TWITTER_ACCESS_SECRET", Value::None)
        .with_default("TWITTER_CONSUMER_KEY", Value::None)
        .with_default("TWITTER_CONSUMER_SECRET", Value::None)
        .with_default("TWITTER_SCREEN_NAME", Value::None)
        .with_default("TZ_OFFSET", Value::None)
        .with_default("USE_ANTICAPTCHA", false)
        .with_default("UVLOOP", true)
        .with_default("WEBHOOK_GYM_MAPPING", Value::Dict(IndexMap::new()))
        .with_default("WEBHOOKS", Value::None)
        .with_default(
            "WEATHER_STATUS",
            Value::dict([
                (0, "Not boosted"),
                (1, "Clear"),
                (2, "Rainy"),
                (3, "Partly Cloudy"),
                (4, "Overcast"),
                (5, "Windy"),
                (6, "Snow"),
                (7, "Fog"),
            ]),
        )
        .with_default("WEBHOOK_RAID_MAPPING", Value::Dict(IndexMap::new()));

    let builder = match host.worker_count {
        Some(workers) => builder
            .with_default("COROUTINES_LIMIT", workers)
            .with_default("SWAP_OLDEST", SWAP_WINDOW_SECS / f64::from(workers)),
        None => builder,
    };

    builder.build()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostContext {
        HostContext::new("/opt/monocle", Some(4))
    }

    #[test]
    fn test_table_is_consistent() {
        let schema = monocle_schema(&host()).unwrap();
        assert!(schema.len() > 200);
    }

    #[test]
    fn test_every_name_is_upper_case() {
        let schema = monocle_schema(&host()).unwrap();
        for option in schema.iter() {
            assert!(
                !option.name.chars().any(char::is_lowercase),
                "{} is not upper-case",
                option.name
            );
        }
    }

    #[test]
    fn test_every_default_has_an_accepted_type_or_is_none() {
        let schema = monocle_schema(&host()).unwrap();
        for option in schema.iter() {
            if let Some(default) = &option.default {
                if default.is_none() {
                    continue;
                }
                assert!(
                    option.expected.accepts(default),
                    "default for {} is {}, expected {}",
                    option.name,
                    default.value_type(),
                    option.expected
                );
            }
        }
    }

    #[test]
    fn test_smart_throttle_default_is_numeric() {
        let schema = monocle_schema(&host()).unwrap();
        let spec = schema.get("SMART_THROTTLE").unwrap();
        assert_eq!(spec.default, Some(Value::Bool(false)));
        assert!(spec.expected.accepts(&Value::Bool(false)));
    }

    #[test]
    fn test_scan_delay_defaults_to_ten() {
        let schema = monocle_schema(&host()).unwrap();
        let spec = schema.get("SCAN_DELAY").unwrap();
        assert_eq!(spec.expected, Expected::Number);
        assert_eq!(spec.default, Some(Value::Int(10)));
    }

    #[test]
    fn test_worker_defaults_follow_grid() {
        let schema = monocle_schema(&host()).unwrap();
        assert_eq!(
            schema.get("COROUTINES_LIMIT").unwrap().default,
            Some(Value::Int(4))
        );
        assert_eq!(
            schema.get("SWAP_OLDEST").unwrap().default,
            Some(Value::Float(5400.0))
        );
    }

    #[test]
    fn test_worker_defaults_absent_without_grid() {
        let schema = monocle_schema(&HostContext::new("/opt/monocle", None)).unwrap();
        assert!(schema.get("COROUTINES_LIMIT").unwrap().is_required());
        assert!(schema.get("SWAP_OLDEST").unwrap().is_required());
    }

    #[test]
    fn test_instance_id_is_install_dir() {
        let schema = monocle_schema(&host()).unwrap();
        assert_eq!(
            schema.get("INSTANCE_ID").unwrap().default,
            Some(Value::from("/opt/monocle"))
        );
    }

    #[test]
    fn test_required_options_have_no_default() {
        let schema = monocle_schema(&host()).unwrap();
        for name in ["DB", "DB_ENGINE", "GRID", "MAP_START", "MAP_END", "HASH_KEY"] {
            assert!(schema.get(name).unwrap().is_required(), "{name}");
        }
    }

    #[test]
    fn test_worker_count_from_grid() {
        let mut raw = RawConfig::new();
        raw.insert("GRID", Value::tuple([4, 5]));
        assert_eq!(HostContext::from_raw(&raw, ".").worker_count, Some(20));
    }

    #[test]
    fn test_worker_count_rejects_bad_grid() {
        for grid in [
            Value::from("4x5"),
            Value::tuple([4]),
            Value::tuple([0, 5]),
            Value::tuple([-1, 5]),
            Value::list([Value::from("a"), Value::from("b")]),
        ] {
            let mut raw = RawConfig::new();
            raw.insert("GRID", grid);
            assert_eq!(HostContext::from_raw(&raw, ".").worker_count, None);
        }
        assert_eq!(
            HostContext::from_raw(&RawConfig::new(), ".").worker_count,
            None
        );
    }
}
