//! Shared fixtures for bhavfeed behavior tests: sample wire payloads for
//! each category and transports pre-loaded with them.

use std::io::{Cursor, Write};

use bhavfeed_core::{source_files, Category, StaticTransport, TradingDay};
use zip::write::SimpleFileOptions;

/// Trading day every fixture refers to.
pub const DAY: &str = "2014-05-28";

pub fn fixture_day() -> TradingDay {
    TradingDay::parse_iso(DAY).expect("valid fixture date")
}

pub const INDICES_BHAV: &str = "\
Index Name,Index Date,Open Index Value,High Index Value,Low Index Value,Closing Index Value,Points Change,Change(%),Volume,Turnover (Rs. Cr.),P/E,P/B,Div Yield
Nifty 50,28-05-2014,7318.85,7329.40,7253.25,7329.65,62.30,0.86,198573624,8525.25,20.51,3.52,1.25
CNX Bank,28-05-2014,14800.00,14950.10,14750.30,14900.45,100.45,0.68,45123456,4010.00,15.20,2.80,1.10
Nifty Midcap,28-05-2014,-,-,-,3104.10,0.00,0.00,-,-,-,-,-
";

pub const EQUITIES_BHAV: &str = "\
SYMBOL,SERIES,OPEN,HIGH,LOW,CLOSE,LAST,PREVCLOSE,TOTTRDQTY,TOTTRDVAL,TIMESTAMP,TOTALTRADES,ISIN
ZEEL,EQ,270.00,275.50,268.10,274.20,274.00,269.90,91000,2480.15,28-MAY-2014,4100,INE256A01028
ABB,EQ,1010.00,1024.00,1000.10,1020.55,1020.00,1008.15,45210,4603.21,28-MAY-2014,1520,INE117A01022
RELCAP,BE,400.00,405.00,398.00,402.10,402.00,399.50,8000,321.68,28-MAY-2014,640,INE013A01015
BOND1,GB,100.00,100.00,100.00,100.00,100.00,100.00,10,0.01,28-MAY-2014,1,INE000B07012
";

pub const EQUITIES_MTO: &str = "\
Record Type,Daily Volume Data
MTO,28052014
Name of the file: MTO_28052014.DAT
20,1,ABB,EQ,45210,30150,66.69
20,2,ZEEL,EQ,91000,55300,60.77
20,3,RELCAP,BE,8000,8000,100.00
";

pub const FUTURES_BHAV: &str = "\
INSTRUMENT,SYMBOL,EXPIRY_DT,STRIKE_PR,OPTION_TYP,OPEN,HIGH,LOW,CLOSE,SETTLE_PR,CONTRACTS,VAL_INLAKH,OPEN_INT,CHG_IN_OI,TIMESTAMP
FUTIDX,NIFTY,31-JUL-2014,0,XX,7350.00,7400.00,7300.00,7380.00,7381.20,210,15000.00,81000,1200,28-MAY-2014
OPTIDX,NIFTY,26-JUN-2014,7400,CE,80.00,95.00,75.00,88.00,88.50,5000,4000.00,250000,10000,28-MAY-2014
FUTIDX,NIFTY,26-JUN-2014,0,XX,7320.00,7360.00,7290.00,7340.00,7341.05,4200,310000.00,1650000,-3200,28-MAY-2014
FUTSTK,ABB,26-JUN-2014,0,XX,1010.00,1025.00,1005.00,1018.00,1019.35,320,3200.00,64000,500,28-MAY-2014
FUTIDX,NIFTY,26-JUN-2014,0,XX,9999.00,9999.00,9999.00,9999.00,9999.00,1,1.00,1,0,28-MAY-2014
";

/// Build a one-entry zip archive the way the exchange packages bhavcopy
/// files.
pub fn zipped_csv(entry_name: &str, contents: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer
            .start_file(entry_name, SimpleFileOptions::default())
            .expect("start entry");
        writer
            .write_all(contents.as_bytes())
            .expect("write entry");
        writer.finish().expect("finish archive");
    }
    buffer.into_inner()
}

fn urls(category: Category) -> Vec<String> {
    source_files(category, fixture_day())
        .into_iter()
        .map(|file| file.url)
        .collect()
}

pub fn indices_transport() -> StaticTransport {
    let urls = urls(Category::Indices);
    StaticTransport::new().with_file(urls[0].clone(), INDICES_BHAV.as_bytes().to_vec())
}

pub fn equities_transport(with_delivery: bool) -> StaticTransport {
    let urls = urls(Category::Equities);
    let mut transport = StaticTransport::new().with_file(
        urls[0].clone(),
        zipped_csv("cm28MAY2014bhav.csv", EQUITIES_BHAV),
    );
    if with_delivery {
        transport = transport.with_file(urls[1].clone(), EQUITIES_MTO.as_bytes().to_vec());
    }
    transport
}

pub fn futures_transport() -> StaticTransport {
    let urls = urls(Category::Futures);
    StaticTransport::new().with_file(
        urls[0].clone(),
        zipped_csv("fo28MAY2014bhav.csv", FUTURES_BHAV),
    )
}

/// Transport serving every category's fixture at once.
pub fn full_transport() -> StaticTransport {
    let indices = urls(Category::Indices);
    let equities = urls(Category::Equities);
    let futures = urls(Category::Futures);
    StaticTransport::new()
        .with_file(indices[0].clone(), INDICES_BHAV.as_bytes().to_vec())
        .with_file(
            equities[0].clone(),
            zipped_csv("cm28MAY2014bhav.csv", EQUITIES_BHAV),
        )
        .with_file(equities[1].clone(), EQUITIES_MTO.as_bytes().to_vec())
        .with_file(
            futures[0].clone(),
            zipped_csv("fo28MAY2014bhav.csv", FUTURES_BHAV),
        )
}
