use stockscan_lib::watchlist::{from_symbols, WatchEntry};
use stockscan_lib::{read_records, write_records, ChartClient, ScanSettings, Scanner};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY: i64 = 86_400;
// 2024-01-02 01:00 UTC, 09:00 in Taipei
const FIRST_SESSION: i64 = 1_704_157_200;

/// Chart payload with `rows` daily sessions. Every tenth session is a `null`
/// row, as Yahoo reports for trading halts.
fn chart_body(symbol: &str, rows: usize, base: f64) -> serde_json::Value {
    let mut timestamps = Vec::new();
    let mut opens = Vec::new();
    let mut highs = Vec::new();
    let mut lows = Vec::new();
    let mut closes = Vec::new();
    let mut volumes = Vec::new();

    for i in 0..rows {
        timestamps.push(FIRST_SESSION + i as i64 * DAY);
        if i % 10 == 9 {
            opens.push(serde_json::Value::Null);
            highs.push(serde_json::Value::Null);
            lows.push(serde_json::Value::Null);
            closes.push(serde_json::Value::Null);
            volumes.push(serde_json::Value::Null);
            continue;
        }
        let close = base + (i as f64 * 0.37).sin() * 10.0 + i as f64 * 0.1;
        opens.push(serde_json::json!(close - 0.5));
        highs.push(serde_json::json!(close + 1.5));
        lows.push(serde_json::json!(close - 1.5));
        closes.push(serde_json::json!(close));
        volumes.push(serde_json::json!(1_000_000 + i as u64 * 1000));
    }

    serde_json::json!({
        "chart": {
            "result": [{
                "meta": {"symbol": symbol, "currency": "TWD", "gmtoffset": 28800},
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": opens,
                        "high": highs,
                        "low": lows,
                        "close": closes,
                        "volume": volumes
                    }]
                }
            }],
            "error": null
        }
    })
}

async fn mount_chart(server: &MockServer, symbol: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn scan_write_and_reload() {
    let server = MockServer::start().await;
    // 250 rows with 25 nulls leaves 225 sessions.
    mount_chart(&server, "2330.TW", 200, chart_body("2330.TW", 250, 800.0)).await;
    // 200 rows with 20 nulls leaves 180 sessions, below the default minimum.
    mount_chart(&server, "6669.TW", 200, chart_body("6669.TW", 200, 2000.0)).await;
    mount_chart(
        &server,
        "0000.TW",
        404,
        serde_json::json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }),
    )
    .await;
    mount_chart(&server, "2454.TW", 200, chart_body("2454.TW", 280, 1200.0)).await;

    let mut entries = from_symbols(["2330.TW", "6669.TW", "0000.TW", "2454.TW"]).unwrap();
    entries[0] = WatchEntry::new("2330.TW").with_name("台積電");

    let scanner = Scanner::new(
        ChartClient::with_base_url(&server.uri()),
        ScanSettings::default(),
    );
    let report = scanner.scan(&entries).await;

    let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2330", "2454"]);
    let skipped: Vec<&str> = report.skipped.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(skipped, vec!["6669.TW", "0000.TW"]);
    assert!(report.skipped[0].reason.contains("180"));
    assert!(report.skipped[1].reason.contains("delisted"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("public").join("data.json");
    write_records(&out, &report.records).unwrap();

    // A generic JSON decoder accepts the file and every number is finite.
    let text = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 2);
    for item in array {
        for (key, field) in item.as_object().unwrap() {
            if let Some(n) = field.as_f64() {
                assert!(n.is_finite(), "{} not finite", key);
            }
        }
        assert!(item["lastTransaction"].is_null());
        assert_eq!(item["winRate"], 70);
    }
    assert_eq!(array[0]["name"], "台積電");
    assert_eq!(array[1]["name"], "2454.TW");

    let reloaded = read_records(&out).unwrap();
    assert_eq!(reloaded, report.records);

    let tsmc = &reloaded[0];
    assert!(tsmc.ma200 > 0.0);
    assert!(tsmc.high_52w >= tsmc.price);
    assert!((0.0..=100.0).contains(&tsmc.k_val));
    assert_eq!(tsmc.k_val, tsmc.d_val);
    assert_eq!(tsmc.prev_k, tsmc.prev_d);
}

#[tokio::test]
async fn server_outage_skips_every_ticker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let entries = from_symbols(["2330.TW", "2454.TW"]).unwrap();
    let scanner = Scanner::new(
        ChartClient::with_base_url(&server.uri()),
        ScanSettings::default(),
    );
    let report = scanner.scan(&entries).await;

    assert!(report.records.is_empty());
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped[0].reason.contains("503"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("data.json");
    write_records(&out, &report.records).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!([]));
}
