use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

// 毎日決まった壁時計時刻に発火するトリガー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    fire_at: NaiveTime,
}

impl DailyTrigger {
    pub fn new(fire_at: NaiveTime) -> Self {
        Self { fire_at }
    }

    // now より厳密に後の、次の発火時刻を返す
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let mut date = now.date_naive();
        loop {
            if let Some(candidate) = resolve(&tz, date.and_time(self.fire_at)) {
                if candidate > *now {
                    return candidate;
                }
            }
            date = date.succ_opt().unwrap_or(NaiveDate::MAX);
        }
    }
}

// 夏時間の切り替えで存在しない時刻は 1 時間後ろにずらし、重複する時刻は早い方を使う
fn resolve<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
}

// 指定日の 0 時 (その日の最初に存在する時刻)
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    resolve(tz, date.and_time(NaiveTime::MIN))
}
