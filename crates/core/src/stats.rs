use crate::blog::{Blog, BlogStatus};

/// Aggregate counts a dashboard renders for one author's posts.
///
/// Computed client-side from whatever list the caller fetched; the server
/// holds no dashboard endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub total_views: i64,
}

impl DashboardStats {
    /// Aggregate over a slice of blogs, typically the result of a
    /// `fetch_blogs` call filtered by author.
    #[must_use]
    pub fn from_blogs(blogs: &[Blog]) -> Self {
        let mut stats = Self {
            total: blogs.len(),
            ..Self::default()
        };
        for blog in blogs {
            match blog.status {
                BlogStatus::Published => stats.published += 1,
                BlogStatus::Draft => stats.drafts += 1,
                BlogStatus::Archived => {}
            }
            stats.total_views += blog.views_count;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(status: BlogStatus, views: i64) -> Blog {
        serde_json::from_str::<Blog>(&format!(
            r#"{{"id": 1, "title": "t", "author": "a", "status": "{status}", "views_count": {views}}}"#,
        ))
        .unwrap()
    }

    #[test]
    fn aggregates_counts_and_views() {
        let blogs = vec![
            blog(BlogStatus::Published, 10),
            blog(BlogStatus::Published, 5),
            blog(BlogStatus::Draft, 0),
            blog(BlogStatus::Archived, 2),
        ];
        let stats = DashboardStats::from_blogs(&blogs);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.total_views, 17);
    }

    #[test]
    fn empty_list_yields_zeroes() {
        assert_eq!(DashboardStats::from_blogs(&[]), DashboardStats::default());
    }
}
