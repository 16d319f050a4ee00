//! Player hiscores client

use crate::api::http::{HttpFetch, with_query};
use crate::api::skills::Skill;
use crate::config::BotConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One hiscores line. Unranked entries come back with a rank of -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub rank: i32,
    pub level: i32,
    pub experience: i64,
}

/// Parsed hiscores, iterated in canonical skill order
pub type Hiscores = BTreeMap<Skill, SkillRecord>;

pub struct HiscoresClient {
    http: Arc<dyn HttpFetch>,
    base_url: String,
}

impl HiscoresClient {
    pub fn new(http: Arc<dyn HttpFetch>, config: &BotConfig) -> Self {
        Self {
            http,
            base_url: config.hiscores_url.clone(),
        }
    }

    /// Fetch and parse the hiscores of `player_name`.
    ///
    /// A failed request is an error; a successful response with no usable
    /// lines is an empty map.
    pub async fn get_hiscores(&self, player_name: &str) -> Result<Hiscores> {
        tracing::info!(player = player_name, "Fetching hiscores");
        let url = with_query(&self.base_url, &[("player", player_name)])?;
        let body = self.http.get_text(&url).await?;

        let hiscores = parse_hiscores(&body);
        tracing::debug!(player = player_name, entries = hiscores.len(), "Parsed hiscores");
        Ok(hiscores)
    }
}

/// Parse a `rank,level,experience` body positionally.
///
/// Lines with the wrong field count, non-numeric fields or an index beyond
/// the skill table are skipped without shifting later lines.
pub fn parse_hiscores(body: &str) -> Hiscores {
    body.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let record = parse_line(line)?;
            let skill = Skill::from_index(index)?;
            Some((skill, record))
        })
        .collect()
}

fn parse_line(line: &str) -> Option<SkillRecord> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let [rank, level, experience] = fields.as_slice() else {
        return None;
    };

    Some(SkillRecord {
        rank: rank.trim().parse().ok()?,
        level: level.trim().parse().ok()?,
        experience: experience.trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::MockHttpFetch;
    use crate::error::BotError;

    #[test]
    fn test_parse_first_line_is_overall() {
        let hiscores = parse_hiscores("150,99,13000000\n");
        assert_eq!(
            hiscores.get(&Skill::Overall),
            Some(&SkillRecord {
                rank: 150,
                level: 99,
                experience: 13_000_000,
            })
        );
    }

    #[test]
    fn test_parse_skips_malformed_lines_positionally() {
        let body = "1,2898,5600000000\n5,99\n7,99,abc\n-1,1,0\n";
        let hiscores = parse_hiscores(body);

        assert_eq!(hiscores.len(), 2);
        assert_eq!(hiscores[&Skill::Overall].experience, 5_600_000_000);
        assert!(!hiscores.contains_key(&Skill::Attack));
        assert!(!hiscores.contains_key(&Skill::Defence));
        assert_eq!(hiscores[&Skill::Strength].rank, -1);
    }

    #[test]
    fn test_parse_ignores_lines_past_table() {
        let body = std::iter::repeat_n("1,1,1", 65).collect::<Vec<_>>().join("\n");
        let hiscores = parse_hiscores(&body);
        assert_eq!(hiscores.len(), Skill::ALL.len());
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_hiscores("").is_empty());
        assert!(parse_hiscores("<html>oops</html>").is_empty());
    }

    #[tokio::test]
    async fn test_get_hiscores_queries_player() {
        let mut mock = MockHttpFetch::new();
        mock.expect_get_text()
            .withf(|url| url.query() == Some("player=Le+Zezima"))
            .times(1)
            .returning(|_| Ok("150,99,13000000\n".to_string()));

        let client = HiscoresClient::new(Arc::new(mock), &BotConfig::default());
        let hiscores = client.get_hiscores("Le Zezima").await.unwrap();
        assert_eq!(hiscores.len(), 1);
    }

    #[tokio::test]
    async fn test_get_hiscores_failure_is_error_not_empty() {
        let mut mock = MockHttpFetch::new();
        mock.expect_get_text().returning(|url| {
            Err(BotError::Status {
                url: url.to_string(),
                status: 404,
            })
        });

        let client = HiscoresClient::new(Arc::new(mock), &BotConfig::default());
        let err = client.get_hiscores("nobody").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
