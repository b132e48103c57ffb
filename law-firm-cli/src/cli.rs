use std::path::PathBuf;

use clap::Parser;
use time::{macros::format_description, Date, OffsetDateTime};

#[derive(Parser, Debug)]
#[command(name = "law-firm-cli", about = "Replay form events against the law-firm handlers")]
pub struct Opts {
    /// Scenario file (JSON) to replay
    pub scenario: PathBuf,

    /// Date the forms treat as today, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub today: Option<Date>,

    /// Acting user, overrides the configured one
    #[arg(long)]
    pub user: Option<String>,

    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

impl Opts {
    /// `--today` if given, else the date at `local`, else the UTC date.
    pub fn today(&self, local: Option<OffsetDateTime>) -> Date {
        self.today
            .or_else(|| local.map(|now| now.date()))
            .unwrap_or_else(|| OffsetDateTime::now_utc().date())
    }
}

fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    #[test]
    fn parses_arguments() {
        let opts = Opts::try_parse_from([
            "law-firm-cli",
            "demos/overnight_time_entry.json",
            "--today",
            "2024-06-30",
            "--user",
            "paralegal@firm.com",
        ])
        .unwrap();
        assert_eq!(opts.today, Some(date!(2024 - 06 - 30)));
        assert_eq!(opts.user.as_deref(), Some("paralegal@firm.com"));
        assert_eq!(opts.config_dir, PathBuf::from("config"));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Opts::try_parse_from(["law-firm-cli", "s.json", "--today", "30/06/2024"]).is_err());
    }

    #[test]
    fn today_prefers_the_flag_then_the_local_date() {
        let evening_in_new_york = datetime!(2024-01-01 23:30 -05:00);

        let opts = Opts::try_parse_from(["law-firm-cli", "s.json", "--today", "2024-06-30"]).unwrap();
        assert_eq!(opts.today(Some(evening_in_new_york)), date!(2024 - 06 - 30));

        let opts = Opts::try_parse_from(["law-firm-cli", "s.json"]).unwrap();
        assert_eq!(opts.today(Some(evening_in_new_york)), date!(2024 - 01 - 01));
        assert_eq!(opts.today(None), OffsetDateTime::now_utc().date());
    }
}
