use chrono::NaiveTime;

// ジョブストア上でジョブを一意に識別するキー
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey {
    pub name: String,
    pub group: String,
}

impl JobKey {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

// 毎日決まった時刻に発火するトリガーを持つ永続ジョブ定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDefinition {
    pub key: JobKey,
    pub trigger_name: String,
    pub fire_at: NaiveTime,
}
