//! Home page

use axum::extract::Query;

use super::{notice_text, NoticeQuery};
use crate::views::HomeTemplate;

/// GET /
pub async fn home(Query(query): Query<NoticeQuery>) -> HomeTemplate {
    HomeTemplate {
        notice: notice_text(query.notice.as_deref()),
    }
}
