//! Remote endpoints and output naming for each category and date.

use time::format_description::BorrowedFormatItem;
use time::macros::{date, format_description};

use crate::domain::TradingDay;
use crate::Category;

/// INDIAVIX moved into the indices bhavcopy on this date; the standalone
/// VIX history file only exists for earlier sessions.
pub const VIX_MERGE_DAY: TradingDay = TradingDay::from_date(date!(2014 - 05 - 14));

const DDMMYYYY: &[BorrowedFormatItem<'static>] = format_description!("[day][month][year]");
const DD_MON_YYYY: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month repr:short]-[year]");
const DDMONYYYY: &[BorrowedFormatItem<'static>] =
    format_description!("[day][month repr:short][year]");
const MON: &[BorrowedFormatItem<'static>] = format_description!("[month repr:short]");

/// One remote file wanted by a category run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub url: String,
    /// Zip archives hold the actual csv table.
    pub zipped: bool,
    /// Required files abort the run when unavailable; optional ones
    /// degrade to a warning.
    pub required: bool,
}

impl SourceFile {
    fn required(url: String) -> Self {
        Self {
            url,
            zipped: false,
            required: true,
        }
    }

    fn required_zip(url: String) -> Self {
        Self {
            url,
            zipped: true,
            required: true,
        }
    }

    fn optional(url: String) -> Self {
        Self {
            url,
            zipped: false,
            required: false,
        }
    }
}

/// Files to fetch for one category and trading day, primary first.
pub fn source_files(category: Category, day: TradingDay) -> Vec<SourceFile> {
    match category {
        Category::Indices => {
            let mut files = vec![SourceFile::required(format!(
                "http://www.nseindia.com/content/indices/ind_close_all_{}.csv",
                ddmmyyyy(day)
            ))];
            if day < VIX_MERGE_DAY {
                files.push(SourceFile::optional(format!(
                    "http://nseindia.com/content/vix/histdata/hist_india_vix_{0}_{0}.csv",
                    dd_mon_yyyy(day)
                )));
            }
            files
        }
        Category::Equities => vec![
            SourceFile::required_zip(format!(
                "http://nseindia.com/content/historical/EQUITIES/{}/{}/cm{}bhav.csv.zip",
                day.date().year(),
                month_token(day),
                ddmonyyyy(day)
            )),
            SourceFile::optional(format!(
                "http://www.nseindia.com/archives/equities/mto/MTO_{}.DAT",
                ddmmyyyy(day)
            )),
        ],
        Category::Futures => vec![SourceFile::required_zip(format!(
            "http://nseindia.com/content/historical/DERIVATIVES/{}/{}/fo{}bhav.csv.zip",
            day.date().year(),
            month_token(day),
            ddmonyyyy(day)
        ))],
    }
}

/// Output table name, encoding category and as-of date.
pub fn output_name(category: Category, day: TradingDay) -> String {
    format!("NSE-{}-{}.csv", category.file_label(), day.format_iso())
}

fn ddmmyyyy(day: TradingDay) -> String {
    day.date()
        .format(&DDMMYYYY)
        .expect("TradingDay must be formattable")
}

fn dd_mon_yyyy(day: TradingDay) -> String {
    day.date()
        .format(&DD_MON_YYYY)
        .expect("TradingDay must be formattable")
}

fn ddmonyyyy(day: TradingDay) -> String {
    day.date()
        .format(&DDMONYYYY)
        .expect("TradingDay must be formattable")
        .to_ascii_uppercase()
}

fn month_token(day: TradingDay) -> String {
    day.date()
        .format(&MON)
        .expect("TradingDay must be formattable")
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(input: &str) -> TradingDay {
        TradingDay::parse_iso(input).expect("valid test date")
    }

    #[test]
    fn indices_urls_encode_the_date() {
        let files = source_files(Category::Indices, day("2014-05-28"));
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].url,
            "http://www.nseindia.com/content/indices/ind_close_all_28052014.csv"
        );
        assert!(files[0].required);
        assert!(!files[0].zipped);
    }

    #[test]
    fn indices_want_the_vix_file_before_the_merge_date() {
        let files = source_files(Category::Indices, day("2014-01-02"));
        assert_eq!(files.len(), 2);
        assert_eq!(
            files[1].url,
            "http://nseindia.com/content/vix/histdata/hist_india_vix_02-Jan-2014_02-Jan-2014.csv"
        );
        assert!(!files[1].required);
    }

    #[test]
    fn equities_urls_use_zip_bhavcopy_and_delivery_dump() {
        let files = source_files(Category::Equities, day("2014-05-28"));
        assert_eq!(
            files[0].url,
            "http://nseindia.com/content/historical/EQUITIES/2014/MAY/cm28MAY2014bhav.csv.zip"
        );
        assert!(files[0].zipped);
        assert_eq!(
            files[1].url,
            "http://www.nseindia.com/archives/equities/mto/MTO_28052014.DAT"
        );
    }

    #[test]
    fn futures_url_targets_the_derivatives_archive() {
        let files = source_files(Category::Futures, day("2014-05-28"));
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].url,
            "http://nseindia.com/content/historical/DERIVATIVES/2014/MAY/fo28MAY2014bhav.csv.zip"
        );
    }

    #[test]
    fn output_names_encode_category_and_day() {
        assert_eq!(
            output_name(Category::Indices, day("2014-05-28")),
            "NSE-Indices-2014-05-28.csv"
        );
        assert_eq!(
            output_name(Category::Futures, day("2014-01-02")),
            "NSE-Futures-2014-01-02.csv"
        );
    }
}
