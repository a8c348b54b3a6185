use serde::Serialize;

use super::classify::{Category, Classification};
use crate::domain::pull::PullRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub text: String,
    pub color: String,
    pub fields: Vec<Field>,
    pub mrkdwn_in: Vec<String>,
}

/// Summary line plus one attachment per non-empty category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// One rendered pull request, ready to be grouped under its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub category: Category,
    pub field: Field,
    pub mentions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: &'static str,
    pub headline: &'static str,
}

pub fn style_for(category: Category) -> Style {
    let (color, headline) = match category {
        Category::Merge => ("good", ":+1::+1: *Please merge*"),
        Category::ReviewPending => ("warning", ":smiley: *Please review!*"),
        Category::ChangesRequested => ("danger", ":wink: *Please address the review comments!*"),
        Category::RequestReviewers => ("danger", ":sweat_smile: *Please assign reviewers!*"),
        Category::RequestAssignees => ("danger", ":sweat_smile: *Please set an assignee!*"),
    };
    Style { color, headline }
}

pub struct MessageBuilder {
    owner: String,
    repo: String,
}

impl MessageBuilder {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn repo_link(&self) -> String {
        let slug = format!("{}/{}", self.owner, self.repo);
        format!("<https://github.com/{slug}|{slug}>")
    }

    pub fn summary(&self, active_count: usize) -> String {
        let link = self.repo_link();
        match active_count {
            0 => format!(
                "There's no open pull request for {link} :tada: Let's take a break :dango: :tea:"
            ),
            1 => format!("There's only one open pull request for {link} :point_up:"),
            n => format!("I found {n} open pull requests for {link}:"),
        }
    }

    pub fn fragment(&self, pull: &PullRequest, classification: Classification) -> Fragment {
        let mentions = classification
            .mentions
            .iter()
            .map(|name| format!("@{name}"))
            .collect::<Vec<_>>()
            .join(" ");
        let value = format!(
            "<{}|{}> by {} => {}",
            pull.url,
            escape(&pull.title),
            pull.author,
            mentions
        );
        Fragment {
            category: classification.category,
            field: Field {
                title: format!("#{}", pull.number),
                value: value.trim_end().to_string(),
                short: false,
            },
            mentions: classification.mentions,
        }
    }

    pub fn attachment(&self, category: Category, fields: Vec<Field>) -> Attachment {
        let style = style_for(category);
        Attachment {
            fallback: style.headline.to_string(),
            text: style.headline.to_string(),
            color: style.color.to_string(),
            fields,
            mrkdwn_in: vec!["text".to_string(), "fallback".to_string()],
        }
    }

    /// Group fragments by category in `Category::ALL` order. Within a group the
    /// fragments keep the order they were given in.
    pub fn payload(&self, summary: String, fragments: Vec<Fragment>) -> Payload {
        let mut attachments = Vec::new();
        for category in Category::ALL {
            let fields: Vec<Field> = fragments
                .iter()
                .filter(|f| f.category == category)
                .map(|f| f.field.clone())
                .collect();
            if fields.is_empty() {
                continue;
            }
            attachments.push(self.attachment(category, fields));
        }
        Payload {
            text: summary,
            attachments,
        }
    }
}

/// Slack treats `&`, `<` and `>` as control characters in message text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pull::fixtures::pull;

    fn builder() -> MessageBuilder {
        MessageBuilder::new("acme", "widgets")
    }

    fn fragment(number: u64, category: Category) -> Fragment {
        builder().fragment(
            &pull(number, "Change", "zed"),
            Classification {
                category,
                mentions: vec!["zed".into()],
            },
        )
    }

    #[test]
    fn summary_for_no_pulls() {
        let s = builder().summary(0);
        assert!(s.starts_with("There's no open pull request for"));
        assert!(s.contains("<https://github.com/acme/widgets|acme/widgets>"));
    }

    #[test]
    fn summary_for_one_pull() {
        let s = builder().summary(1);
        assert!(s.starts_with("There's only one open pull request for"));
        assert!(s.contains("acme/widgets"));
    }

    #[test]
    fn summary_for_many_pulls_states_count_once() {
        let s = builder().summary(2);
        assert!(s.starts_with("I found 2 open pull requests for"));
        assert_eq!(s.matches('2').count(), 1);
    }

    #[test]
    fn field_links_title_and_addresses_mentions() {
        let pr = pull(42, "Add search", "zed");
        let got = builder().fragment(
            &pr,
            Classification {
                category: Category::ReviewPending,
                mentions: vec!["alice".into(), "bob".into()],
            },
        );
        assert_eq!(got.field.title, "#42");
        assert_eq!(
            got.field.value,
            "<https://github.com/acme/widgets/pull/42|Add search> by zed => @alice @bob"
        );
        assert!(!got.field.short);
    }

    #[test]
    fn title_markup_is_escaped() {
        let pr = pull(7, "Use Vec<u8> & drop <legacy|link>", "zed");
        let got = builder().fragment(
            &pr,
            Classification {
                category: Category::Merge,
                mentions: vec!["zed".into()],
            },
        );
        assert_eq!(
            got.field.value,
            "<https://github.com/acme/widgets/pull/7|Use Vec&lt;u8&gt; &amp; drop &lt;legacy|link&gt;> by zed => @zed"
        );
    }

    #[test]
    fn style_table_maps_urgency() {
        assert_eq!(style_for(Category::Merge).color, "good");
        assert_eq!(style_for(Category::ReviewPending).color, "warning");
        assert_eq!(style_for(Category::ChangesRequested).color, "danger");
        assert_eq!(style_for(Category::RequestReviewers).color, "danger");
        assert_eq!(style_for(Category::RequestAssignees).color, "danger");
    }

    #[test]
    fn payload_groups_in_category_order_and_skips_empty() {
        let fragments = vec![
            fragment(1, Category::RequestReviewers),
            fragment(2, Category::Merge),
            fragment(3, Category::RequestReviewers),
            fragment(4, Category::Merge),
        ];
        let payload = builder().payload("summary".into(), fragments);
        assert_eq!(payload.text, "summary");
        assert_eq!(payload.attachments.len(), 2);

        let merge = &payload.attachments[0];
        assert_eq!(merge.color, "good");
        let titles: Vec<&str> = merge.fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["#2", "#4"]);

        let reviewers = &payload.attachments[1];
        assert_eq!(reviewers.text, style_for(Category::RequestReviewers).headline);
        let titles: Vec<&str> = reviewers.fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["#1", "#3"]);
    }

    #[test]
    fn payload_serializes_in_slack_shape() {
        let payload = builder().payload("hi".into(), vec![fragment(5, Category::ReviewPending)]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["text"], "hi");
        assert_eq!(json["attachments"][0]["color"], "warning");
        assert_eq!(json["attachments"][0]["fields"][0]["title"], "#5");
        assert_eq!(json["attachments"][0]["mrkdwn_in"][0], "text");
    }
}
