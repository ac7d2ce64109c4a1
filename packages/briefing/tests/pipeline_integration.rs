//! End-to-end pipeline tests through the mock capabilities:
//! fetch → extract → summarize → translate → conversation session.

use briefing::testing::{MockAi, MockFetcher};
use briefing::{Briefing, Language, SessionState, FAILURE_MARKER};

const HOMEPAGE_URL: &str = "https://news.example.com";
const MODEL: &str = "test-model";

fn homepage_html() -> String {
    let mut html = String::from(
        r#"<html><head><title>Example News</title>
        <script>window.analytics = "this tracking snippet is long enough to matter";</script>
        </head><body>
        <nav><a href="/login">Login to your account to continue reading now</a></nav>
        "#,
    );
    for i in 0..5 {
        html.push_str(&format!(
            r#"<a href="/story/{i}">Major development number {i} reshapes the policy debate</a>
            <p>Reporters describe development number {i} in a blurb that is long enough to keep.</p>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

#[tokio::test]
async fn summarize_produces_language_tagged_record() {
    let fetcher = MockFetcher::new().with_page(HOMEPAGE_URL, homepage_html());
    let ai = MockAi::new()
        .with_reply("- [Major development](https://news.example.com/story/0) reshapes policy");

    let page = briefing::extract(&fetcher, HOMEPAGE_URL).await.unwrap();
    let record = briefing::summarize(&ai, &page.sample_text, &page.links, MODEL)
        .await
        .unwrap();

    assert_eq!(record.language, Language::En);
    assert!(!record.is_failure());
    assert!(record.translations.is_empty());

    // The prompt the model saw carried both the sample and link candidates
    let calls = ai.calls();
    let briefing::testing::MockAiCall::Complete { last_user_text, .. } = &calls[0] else {
        panic!("expected a completion call");
    };
    assert!(last_user_text.contains("Major development number 0"));
    assert!(last_user_text.contains("https://news.example.com/story/0"));
    // The nav anchor was filtered by the blocklist
    assert!(!last_user_text.contains("Login to your account"));
}

#[tokio::test]
async fn fetch_failure_yields_marker_record_in_english() {
    let briefing = Briefing::new(MockFetcher::failing(), MockAi::new());

    // Typed API: a real error
    assert!(briefing.summarize(HOMEPAGE_URL, MODEL).await.is_err());

    // Lossy API: the marker convention
    let record = briefing.summarize_lossy(HOMEPAGE_URL, MODEL).await;
    assert!(record.content.starts_with(FAILURE_MARKER));
    assert!(record.is_failure());
    assert_eq!(record.language, Language::En);
}

#[tokio::test]
async fn translation_round_trip_preserves_links() {
    let en_summary = "- [Policy shift](https://news.example.com/story/0)\n\
                      - [Market rally](https://news.example.com/story/1)";
    let zh_summary = "- [政策转向](https://news.example.com/story/0)\n\
                      - [市场上涨](https://news.example.com/story/1)";

    let briefing = Briefing::new(
        MockFetcher::new(),
        MockAi::new().with_reply(zh_summary).with_reply(en_summary),
    );

    let mut record = briefing::SummaryRecord::new(en_summary, Language::En);
    let zh = briefing
        .translated(&mut record, Language::Zh, MODEL)
        .await
        .unwrap();
    let en_again = briefing::translate(
        &MockAi::new().with_reply(en_summary),
        &zh,
        Language::En,
        MODEL,
    )
    .await
    .unwrap();

    // Embedded URLs survive en → zh → en verbatim
    for url in [
        "https://news.example.com/story/0",
        "https://news.example.com/story/1",
    ] {
        assert!(zh.contains(url));
        assert!(en_again.contains(url));
    }
}

#[tokio::test]
async fn session_lifecycle_over_a_summary() {
    let briefing = Briefing::new(
        MockFetcher::new().with_page(HOMEPAGE_URL, homepage_html()),
        MockAi::new()
            .with_reply("- [Major development](https://news.example.com/story/0) reshapes policy")
            .with_reply("The summary highlights a major policy development."),
    );

    let record = briefing.summarize(HOMEPAGE_URL, MODEL).await.unwrap();
    let mut session = briefing.open_session(&record, MODEL).await.unwrap();

    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.chunk_count() >= 1);

    let answer = session.ask("What is the main story?").await.unwrap();
    assert!(answer.contains("policy development"));
    assert_eq!(session.history().len(), 2);

    session.close();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.ask("Still there?").await.is_err());
}

#[tokio::test]
async fn session_open_propagates_embedding_failure() {
    let briefing = Briefing::new(MockFetcher::new(), MockAi::new().failing_embeddings());
    let record = briefing::SummaryRecord::new("A summary worth asking about.", Language::En);

    assert!(briefing.open_session(&record, MODEL).await.is_err());
}
