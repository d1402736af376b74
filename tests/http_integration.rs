//! Integration tests for the archive client using wiremock
//!
//! These tests run searches and hydrations against mocked archive endpoints,
//! covering pagination, by-id lookups, merge behaviour and failure handling.

use digitalarchive::archive::HttpOptions;
use digitalarchive::model::{
    resolve, Collection, Coverage, Document, Field, FieldState, PayloadShape, Resource, Subject,
    Transcript,
};
use digitalarchive::{ArchiveClient, ArchiveError, Filters};
use futures::{StreamExt, TryStreamExt};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, page_size: u32) -> ArchiveClient {
    ArchiveClient::with_options(&server.uri(), page_size, &HttpOptions::default())
        .expect("client should build")
}

fn doc_hit(id: usize) -> Value {
    json!({
        "id": id.to_string(),
        "uri": format!("/srv/record/{}.json", id),
        "title": format!("Document {}", id),
        "doc_date": "19620101",
        "source_created_at": "2013-08-01 12:00:00"
    })
}

fn page_body(ids: std::ops::Range<usize>, total: usize) -> Value {
    json!({
        "list": ids.map(doc_hit).collect::<Vec<_>>(),
        "pagination": { "totalItems": total }
    })
}

/// Mount a search page for `/srv/record.json?page=n`
async fn mount_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/srv/record.json"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn search_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/srv/record.json")
        .count()
}

fn detail_document(id: &str) -> Value {
    json!({
        "id": id,
        "uri": format!("/srv/record/{}.json", id),
        "title": "Telegram from Soviet Ambassador",
        "description": "Full description",
        "doc_date": "19621026",
        "frontend_doc_date": "October 26, 1962",
        "slug": "telegram",
        "source_created_at": "2013-08-01 12:00:00",
        "source_updated_at": "2019-09-26 13:29:41",
        "first_published_at": "2013-08-02 09:30:00",
        "source": "AVPRF",
        "type": [{ "id": 1, "name": "Telegram" }],
        "rights": [],
        "pdf_generated_at": "2019-09-26",
        "date_range_start": "19621026",
        "sort_string_by_coverage": "Cuba",
        "model": "Record",
        "donors": [],
        "subjects": [],
        "transcripts": [],
        "translations": [],
        "media_files": [],
        "languages": [{ "id": "rus", "name": "Russian" }],
        "contributors": [],
        "creators": [],
        "original_coverages": [],
        "collections": [],
        "attachments": [],
        "links": [],
        "repositories": [],
        "publishers": [],
        "classifications": []
    })
}

mod search_tests {
    use super::*;

    /// 656 matches at 200 per page: 200, 200, 200, 56
    #[tokio::test]
    async fn test_soviet_search_spans_four_pages() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/srv/record.json"))
            .and(query_param("q", "soviet"))
            .and(query_param("model", "Record"))
            .and(query_param("itemsPerPage", "200"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0..200, 656)))
            .mount(&server)
            .await;
        mount_page(&server, 2, page_body(200..400, 656)).await;
        mount_page(&server, 3, page_body(400..600, 656)).await;
        mount_page(&server, 4, page_body(600..656, 656)).await;

        let client = client(&server, 200);
        let filters = Filters::new().text("name", "soviet");
        let matcher = assert_ok!(client.matcher::<Document>(filters).await);
        assert_eq!(matcher.count(), 656);
        assert_eq!(search_requests(&server).await, 1);

        // Pages are fetched only as the stream is consumed
        let mut stream = matcher.all();
        let mut seen = Vec::new();
        for _ in 0..201 {
            seen.push(assert_ok!(stream.try_next().await).expect("record"));
        }
        assert_eq!(seen[200].id, "200");
        assert_eq!(search_requests(&server).await, 3);

        while let Some(doc) = assert_ok!(stream.try_next().await) {
            seen.push(doc);
        }
        assert_eq!(seen.len(), 656);
        assert_eq!(seen.len(), matcher.count());
        assert_eq!(search_requests(&server).await, 5);
    }

    /// 453 matches: three fetches of 200, 200, 53 and nothing after the short page
    #[tokio::test]
    async fn test_short_page_ends_iteration() {
        let server = MockServer::start().await;
        mount_page(&server, 1, page_body(0..200, 453)).await;
        mount_page(&server, 2, page_body(200..400, 453)).await;
        mount_page(&server, 3, page_body(400..453, 453)).await;

        let client = client(&server, 200);
        let matcher = assert_ok!(client.matcher::<Document>(Filters::new()).await);
        let docs = assert_ok!(matcher.collect_all().await);

        assert_eq!(docs.len(), 453);
        assert_eq!(matcher.count(), 453);
        assert_eq!(search_requests(&server).await, 1 + 3);
    }

    #[tokio::test]
    async fn test_all_restarts_from_first_page() {
        let server = MockServer::start().await;
        mount_page(&server, 1, page_body(0..3, 5)).await;
        mount_page(&server, 2, page_body(3..5, 5)).await;

        let client = client(&server, 3);
        let matcher = assert_ok!(client.matcher::<Document>(Filters::new()).await);

        let first: Vec<String> =
            assert_ok!(matcher.collect_all().await).into_iter().map(|d| d.id).collect();
        let second: Vec<String> =
            assert_ok!(matcher.collect_all().await).into_iter().map(|d| d.id).collect();

        assert_eq!(first, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(first, second);
        assert_eq!(matcher.count(), 5);
        assert_eq!(search_requests(&server).await, 1 + 2 + 2);
    }

    #[tokio::test]
    async fn test_by_id_ignores_other_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/record/112566.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_document("112566")))
            .mount(&server)
            .await;

        let client = client(&server, 200);
        let alone = assert_ok!(client.matcher::<Document>(Filters::new().id("112566")).await);
        let with_others = Filters::new()
            .id("112566")
            .text("title", "ignored")
            .text("end_date", "19500101");
        let combined = assert_ok!(client.matcher::<Document>(with_others).await);

        assert_eq!(alone.count(), 1);
        assert_eq!(combined.count(), 1);
        let doc = assert_ok!(alone.first());
        assert_eq!(doc.id, "112566");
        assert_eq!(assert_ok!(combined.first()), doc);
        assert!(doc.is_hydrated());

        let all = assert_ok!(alone.collect_all().await);
        assert_eq!(all.len(), 1);
        assert_eq!(search_requests(&server).await, 0);
    }

    #[tokio::test]
    async fn test_by_id_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/record/1.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client(&server, 200);
        let result = client.matcher::<Document>(Filters::new().id("1")).await;
        assert!(matches!(result, Err(ArchiveError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_first_without_matches_is_not_found() {
        let server = MockServer::start().await;
        mount_page(&server, 1, page_body(0..0, 0)).await;

        let client = client(&server, 200);
        let filters = Filters::new().text("title", "zzz");
        let matcher = assert_ok!(client.matcher::<Document>(filters).await);
        assert_eq!(matcher.count(), 0);
        assert!(matches!(matcher.first(), Err(ArchiveError::NotFound { .. })));

        let docs = assert_ok!(matcher.collect_all().await);
        assert!(docs.is_empty());
        assert_eq!(search_requests(&server).await, 1);
    }

    #[tokio::test]
    async fn test_invalid_filter_makes_no_request() {
        let server = MockServer::start().await;
        let client = client(&server, 200);

        let result = client.matcher::<Subject>(Filters::new().text("colour", "red")).await;
        assert!(matches!(result, Err(ArchiveError::InvalidFilter { .. })));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_empty_page_before_count_is_pagination_error() {
        let server = MockServer::start().await;
        mount_page(&server, 1, page_body(0..200, 500)).await;
        mount_page(&server, 2, page_body(0..0, 500)).await;

        let client = client(&server, 200);
        let matcher = assert_ok!(client.matcher::<Document>(Filters::new()).await);
        let err = assert_err!(matcher.collect_all().await);

        match err {
            ArchiveError::Pagination {
                page,
                fetched,
                expected,
                ..
            } => {
                assert_eq!(page, 2);
                assert_eq!(fetched, 200);
                assert_eq!(expected, 500);
            },
            other => panic!("expected pagination error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_page_ends_stream_with_remote_error() {
        let server = MockServer::start().await;
        mount_page(&server, 1, page_body(0..2, 4)).await;
        Mock::given(method("GET"))
            .and(path("/srv/record.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client(&server, 2);
        let matcher = assert_ok!(client.matcher::<Document>(Filters::new()).await);
        let results: Vec<_> = matcher.all().collect().await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok() && results[1].is_ok());
        let err = results[2].as_ref().unwrap_err();
        assert_eq!(err.http_status(), Some(503));
        assert!(matches!(err, ArchiveError::Remote { .. }));
    }

    #[tokio::test]
    async fn test_unpaginated_kind_counts_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/subject.json"))
            .and(query_param("term", "nuclear"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    { "id": 1, "name": "Nuclear Weapons" },
                    { "id": 2, "name": "Nuclear Energy" },
                    { "id": 3, "name": "Nuclear Testing" }
                ]
            })))
            .mount(&server)
            .await;

        let client = client(&server, 2);
        let filters = Filters::new().text("name", "nuclear");
        let matcher = assert_ok!(client.matcher::<Subject>(filters).await);
        assert_eq!(matcher.count(), 3);

        let subjects = assert_ok!(matcher.collect_all().await);
        assert_eq!(subjects.len(), 3);
        assert_eq!(subjects[2].field("uri"), FieldState::Unhydrated);
    }

    #[tokio::test]
    async fn test_relation_filters_sent_as_repeated_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/record.json"))
            .and(query_param("collection[]", "35"))
            .and(query_param("collection[]", "12"))
            .and(query_param("start_date", "19450101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0..1, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, 200);
        let collections = vec![Collection::new("35"), Collection::new("12")];
        let filters = Filters::new()
            .related("collections", &collections)
            .text("start_date", "19450101");
        let matcher = assert_ok!(client.matcher::<Document>(filters).await);
        assert_eq!(matcher.count(), 1);
    }

    #[tokio::test]
    async fn test_date_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/record/date_range.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "begin": "18500101", "end": "20201231" })),
            )
            .mount(&server)
            .await;

        let range = assert_ok!(client(&server, 200).date_range().await);
        assert_eq!(range.begin.to_string(), "18500101");
        assert_eq!(range.end.to_string(), "20201231");
    }
}

mod hydrate_tests {
    use super::*;

    async fn mount_json(server: &MockServer, at: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_content(server: &MockServer, at: &str, status: u16, body: &[u8]) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
    }

    fn transcript_meta(id: usize, extension: &str) -> Value {
        json!({
            "id": id,
            "filename": format!("t{}.{}", id, extension),
            "content_type": if extension == "pdf" { "application/pdf" } else { "text/html" },
            "extension": extension,
            "asset_id": format!("asset-{}", id),
            "source_created_at": "2013-08-01 12:00:00",
            "source_updated_at": "2013-08-01 12:00:00",
            "url": format!("/download/t{}.{}", id, extension)
        })
    }

    #[tokio::test]
    async fn test_hydrate_merges_detail_and_is_idempotent() {
        let server = MockServer::start().await;
        mount_json(&server, "/srv/record/7.json", detail_document("7")).await;

        let client = client(&server, 200);
        let mut doc: Document = assert_ok!(resolve(&doc_hit(7), PayloadShape::Summary));
        assert!(!doc.is_hydrated());
        assert_eq!(doc.title, Field::Known("Document 7".to_string()));

        assert_ok!(client.hydrate(&mut doc, false).await);
        assert!(doc.is_hydrated(), "pending: {:?}", doc.pending_fields());
        assert_eq!(doc.id, "7");
        assert_eq!(doc.title, Field::Known("Telegram from Soviet Ambassador".to_string()));
        assert_eq!(doc.main_src, Field::Absent);
        assert_eq!(doc.languages.known().map(Vec::len), Some(1));

        let once = doc.clone();
        assert_ok!(client.hydrate(&mut doc, false).await);
        assert_eq!(doc, once);

        // serialize -> resolve reproduces the hydrated record
        let round_trip: Document = assert_ok!(resolve(
            &assert_ok!(digitalarchive::model::serialize(&doc)),
            PayloadShape::Detail
        ));
        assert_eq!(round_trip, doc);
    }

    #[tokio::test]
    async fn test_collection_keeps_fields_missing_from_detail() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/srv/collection/35.json",
            json!({
                "id": 35,
                "name": "Nuclear History",
                "description": "Records on proliferation"
            }),
        )
        .await;

        let client = client(&server, 200);
        let mut collection: Collection = assert_ok!(resolve(
            &json!({ "id": "35", "name": "Nuclear", "slug": "nuclear-history" }),
            PayloadShape::Summary
        ));
        assert_ok!(client.hydrate(&mut collection, false).await);

        assert_eq!(collection.slug, Field::Known("nuclear-history".to_string()));
        assert_eq!(collection.name, Field::Known("Nuclear History".to_string()));
        assert_eq!(collection.parent, Field::Pending);
        assert!(!collection.is_hydrated());
    }

    #[tokio::test]
    async fn test_recursive_hydrate_fetches_transcript_content() {
        let server = MockServer::start().await;
        let mut detail = detail_document("9");
        detail["transcripts"] = json!([
            { "id": 1, "url": "/download/t1.html", "extension": "html" },
            { "id": 2, "url": "/download/t2.html", "extension": "html" },
            { "id": 3, "url": "/download/t3.pdf", "extension": "pdf" }
        ]);
        mount_json(&server, "/srv/record/9.json", detail).await;
        for (id, ext) in [(1, "html"), (2, "html"), (3, "pdf")] {
            let at = format!("/srv/transcript/{}.json", id);
            mount_json(&server, &at, transcript_meta(id, ext)).await;
        }
        mount_content(&server, "/download/t1.html", 200, b"<p>one</p>").await;
        mount_content(&server, "/download/t2.html", 200, b"<p>two</p>").await;
        mount_content(&server, "/download/t3.pdf", 200, b"%PDF-1.4").await;

        let client = client(&server, 200);
        let mut doc = Document::new("9");
        assert_ok!(client.hydrate(&mut doc, true).await);

        let transcripts = doc.transcripts.known().expect("transcripts populated");
        assert_eq!(transcripts.len(), 3);
        for transcript in transcripts {
            assert!(transcript.is_hydrated(), "transcript {} not hydrated", transcript.id);
            assert_eq!(transcript.parent_id.as_deref(), Some("9"));
        }
        assert_eq!(transcripts[0].html, Field::Known("<p>one</p>".to_string()));
        assert_eq!(transcripts[0].pdf, Field::Absent);
        assert_eq!(transcripts[2].pdf, Field::Known(b"%PDF-1.4".to_vec()));
        assert_eq!(transcripts[2].html, Field::Absent);
    }

    #[tokio::test]
    async fn test_asset_without_format_is_schema_error() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/srv/transcript/5.json",
            json!({ "id": 5, "asset_id": "a5", "url": "/download/t5" }),
        )
        .await;

        let client = client(&server, 200);
        let mut transcript = Transcript::new("5");
        let err = assert_err!(client.hydrate(&mut transcript, false).await);
        assert!(matches!(err, ArchiveError::Schema { .. }), "{:?}", err);
        assert_eq!(transcript, Transcript::new("5"));
    }

    #[tokio::test]
    async fn test_zero_byte_asset_is_schema_error() {
        let server = MockServer::start().await;
        mount_json(&server, "/srv/transcript/6.json", transcript_meta(6, "html")).await;
        mount_content(&server, "/download/t6.html", 200, b"").await;

        let client = client(&server, 200);
        let mut transcript = Transcript::new("6");
        let err = assert_err!(client.hydrate(&mut transcript, false).await);
        assert!(matches!(err, ArchiveError::Schema { .. }), "{:?}", err);
        assert!(transcript.html.is_pending());
    }

    #[tokio::test]
    async fn test_asset_falls_back_to_asset_endpoint() {
        let server = MockServer::start().await;
        let mut meta = transcript_meta(8, "html");
        meta["url"] = Value::Null;
        mount_json(&server, "/srv/transcript/8.json", meta).await;
        mount_content(&server, "/srv/asset/asset-8", 200, b"<p>eight</p>").await;

        let client = client(&server, 200);
        let mut transcript = Transcript::new("8");
        assert_ok!(client.hydrate(&mut transcript, false).await);
        assert_eq!(transcript.html, Field::Known("<p>eight</p>".to_string()));
    }

    #[tokio::test]
    async fn test_failed_child_leaves_parent_untouched() {
        let server = MockServer::start().await;
        let mut detail = detail_document("11");
        detail["transcripts"] =
            json!([{ "id": 1, "url": "/download/t1.html", "extension": "html" }]);
        mount_json(&server, "/srv/record/11.json", detail).await;
        mount_json(&server, "/srv/transcript/1.json", transcript_meta(1, "html")).await;
        mount_content(&server, "/download/t1.html", 500, b"boom").await;

        let client = client(&server, 200);
        let mut doc: Document = assert_ok!(resolve(&doc_hit(11), PayloadShape::Summary));
        let before = doc.clone();

        let err = assert_err!(client.hydrate(&mut doc, true).await);
        assert_eq!(err.http_status(), Some(500));
        assert_eq!(doc, before);
        assert_eq!(doc.title, Field::Known("Document 11".to_string()));
    }

    #[tokio::test]
    async fn test_metadata_failure_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/record/12.json"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client(&server, 200);
        let mut doc = Document::new("12");
        let err = assert_err!(client.hydrate(&mut doc, false).await);
        assert!(matches!(err, ArchiveError::Remote { status: Some(502), .. }));
        assert_eq!(doc, Document::new("12"));
    }

    #[tokio::test]
    async fn test_hydrate_without_id_is_unidentified() {
        let server = MockServer::start().await;
        let client = client(&server, 200);

        let mut doc = Document::new("");
        let err = assert_err!(client.hydrate(&mut doc, false).await);
        assert!(matches!(err, ArchiveError::UnidentifiedRecord { .. }));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_matcher_hydrate_keeps_count() {
        let server = MockServer::start().await;
        mount_page(&server, 1, page_body(1..3, 2)).await;
        mount_json(&server, "/srv/record/1.json", detail_document("1")).await;
        mount_json(&server, "/srv/record/2.json", detail_document("2")).await;

        let client = client(&server, 200);
        let matcher = assert_ok!(client.matcher::<Document>(Filters::new()).await);
        let docs = assert_ok!(matcher.hydrate(false).await);

        assert_eq!(matcher.count(), 2);
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.is_hydrated()));
    }

    #[tokio::test]
    async fn test_recursion_stops_at_repeated_kind() {
        let server = MockServer::start().await;

        // 1 attaches 2, and 2 links back to 1
        let mut first = detail_document("1");
        first["attachments"] = json!([{ "id": "2", "title": "Attachment" }]);
        let mut second = detail_document("2");
        second["attachments"] = json!([{ "id": "1" }]);
        second["transcripts"] =
            json!([{ "id": 5, "url": "/download/t5.html", "extension": "html" }]);

        Mock::given(method("GET"))
            .and(path("/srv/record/1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(first))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/srv/record/2.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(second))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/srv/transcript/5.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(transcript_meta(5, "html")))
            .expect(0)
            .mount(&server)
            .await;

        let client = client(&server, 200);
        let mut doc = Document::new("1");
        assert_ok!(client.hydrate(&mut doc, true).await);

        let attachments = doc.attachments.known().expect("attachments populated");
        assert_eq!(attachments.len(), 1);
        let attachment = &attachments[0];
        assert!(attachment.is_hydrated());
        assert_eq!(attachment.title, Field::Known("Telegram from Soviet Ambassador".to_string()));

        // The attachment was not descended into
        let nested = attachment.transcripts.known().expect("transcripts listed");
        assert!(!nested[0].is_hydrated());
        let back_link = &attachment.attachments.known().expect("attachments listed")[0];
        assert!(!back_link.is_hydrated());

        assert_eq!(server.received_requests().await.unwrap_or_default().len(), 2);
    }

    #[tokio::test]
    async fn test_coverage_tree_hydrates_without_looping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/srv/coverage/10.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 10,
                "name": "Cuba",
                "uri": "/srv/coverage/10.json",
                "value": "Cuba",
                "parent": { "id": 20, "name": "Caribbean" },
                "children": []
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/srv/coverage/20.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 20,
                "name": "Caribbean",
                "uri": "/srv/coverage/20.json",
                "value": "Caribbean",
                "parent": [],
                "children": [{ "id": 10, "name": "Cuba" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, 200);
        let mut cuba = Coverage::new("10");
        assert_ok!(client.hydrate(&mut cuba, true).await);

        let parent = cuba.parent.known().expect("parent populated");
        assert_eq!(parent.id, "20");
        assert_eq!(parent.parent, Field::Absent);
        assert_eq!(parent.children.known().map(Vec::len), Some(1));
        assert!(cuba.is_hydrated());
    }
}
