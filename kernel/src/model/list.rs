use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub page: i64,
    pub size: i64,
}

impl ListOptions {
    // 範囲外のページ指定は桁あふれさせずに不正なリクエストとして扱う
    pub fn offset(&self) -> AppResult<i64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset >= 0)
            .ok_or_else(|| AppError::BadRequest(format!("page {} is out of range", self.page)))
    }
}

#[derive(Debug)]
pub struct PaginatedList<T> {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub items: Vec<T>,
}

impl<T> PaginatedList<T> {
    pub fn total_pages(&self) -> i64 {
        if self.size <= 0 {
            return 0;
        }
        (self.total + self.size - 1) / self.size
    }
}
