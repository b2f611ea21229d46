// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use goalclip::currency::{FALLBACK_RATE, convert, fetch_rate, format_currency};
use goalclip::models::{Currency, ExchangeRate, RateSource};
use goalclip::store::RateStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::rc::Rc;
use std::thread;

fn rate(r: Decimal) -> ExchangeRate {
    ExchangeRate {
        rate: r,
        last_updated: Utc::now(),
        from_currency: Currency::Usd,
        to_currency: Currency::Inr,
    }
}

fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Answers exactly one request with the given status line and body.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut sock, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = sock.read(&mut buf);
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = sock.write_all(resp.as_bytes());
        }
    });
    format!("http://{addr}/latest/USD")
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/latest/USD")
}

#[test]
fn same_currency_is_identity() {
    let r = rate(dec!(83.5));
    for ccy in [Currency::Inr, Currency::Usd] {
        assert_eq!(convert(dec!(1234.567), ccy, ccy, &r), dec!(1234.567));
    }
}

#[test]
fn usd_inr_multiply_and_divide() {
    let r = rate(dec!(83.5));
    assert_eq!(convert(dec!(100), Currency::Usd, Currency::Inr, &r), dec!(8350));
    assert_eq!(convert(dec!(167), Currency::Inr, Currency::Usd, &r), dec!(2));
}

#[test]
fn round_trip_within_tolerance() {
    let tol = dec!(0.000000001);
    for r in [dec!(83.5), dec!(82.9731), dec!(0.0125), dec!(1)] {
        let fx = rate(r);
        for amount in [dec!(0.01), dec!(1000), dec!(123456.78), dec!(9999999)] {
            let inr = convert(amount, Currency::Usd, Currency::Inr, &fx);
            let back = convert(inr, Currency::Inr, Currency::Usd, &fx);
            assert!((back - amount).abs() < tol, "{amount} @ {r}: {back}");

            let usd = convert(amount, Currency::Inr, Currency::Usd, &fx);
            let back = convert(usd, Currency::Usd, Currency::Inr, &fx);
            assert!((back - amount).abs() < tol, "{amount} @ {r}: {back}");
        }
    }
}

#[test]
fn formatting_per_currency() {
    assert_eq!(format_currency(dec!(1234.5), Currency::Usd), "$1,234.50");
    assert_eq!(format_currency(dec!(0), Currency::Usd), "$0.00");
    assert_eq!(format_currency(dec!(0.005), Currency::Usd), "$0.01");
    assert_eq!(format_currency(dec!(123456.5), Currency::Inr), "₹123,457");
    assert_eq!(format_currency(dec!(999.4), Currency::Inr), "₹999");
    assert_eq!(format_currency(dec!(10000000), Currency::Inr), "₹10,000,000");
    assert_eq!(format_currency(dec!(-42.1), Currency::Usd), "-$42.10");
    assert_eq!(format_currency(dec!(-0.2), Currency::Inr), "₹0");
}

#[test]
fn unreachable_endpoint_falls_back() {
    let fetched = fetch_rate(&client(), &closed_port_url());
    assert_eq!(fetched.rate.rate, dec!(83.5));
    assert_eq!(fetched.rate.rate, FALLBACK_RATE);
    assert_eq!(fetched.rate.from_currency, Currency::Usd);
    assert_eq!(fetched.rate.to_currency, Currency::Inr);
    assert!(fetched.is_fallback());
    assert!((Utc::now() - fetched.rate.last_updated).num_seconds() < 60);
}

#[test]
fn live_rate_from_keyed_shape() {
    let url = serve_once(
        "200 OK",
        r#"{"result":"success","base_code":"USD","conversion_rates":{"USD":1,"INR":84.0312}}"#,
    );
    let fetched = fetch_rate(&client(), &url);
    assert_eq!(fetched.source, RateSource::Live);
    assert_eq!(fetched.rate.rate, dec!(84.0312));
}

#[test]
fn live_rate_from_open_shape() {
    let url = serve_once("200 OK", r#"{"base":"USD","rates":{"EUR":0.92,"INR":83.12}}"#);
    let fetched = fetch_rate(&client(), &url);
    assert!(!fetched.is_fallback());
    assert_eq!(fetched.rate.rate, dec!(83.12));
}

#[test]
fn error_status_falls_back() {
    let url = serve_once("503 Service Unavailable", r#"{"rates":{"INR":90}}"#);
    let fetched = fetch_rate(&client(), &url);
    assert!(fetched.is_fallback());
    assert_eq!(fetched.rate.rate, FALLBACK_RATE);
}

#[test]
fn missing_inr_falls_back() {
    let url = serve_once("200 OK", r#"{"rates":{"EUR":0.92}}"#);
    let fetched = fetch_rate(&client(), &url);
    match fetched.source {
        RateSource::Fallback { reason } => assert!(reason.contains("INR rate not found")),
        RateSource::Live => panic!("expected fallback"),
    }
}

#[test]
fn last_replacement_wins() {
    let mut rates = RateStore::new();
    assert!(rates.current().is_none());
    let slow = goalclip::currency::fallback_rate("first refresh");
    let fast = goalclip::models::FetchedRate {
        rate: rate(dec!(84)),
        source: RateSource::Live,
    };
    // second refresh completes first, first refresh lands afterwards
    rates.replace(fast);
    rates.replace(slow.clone());
    assert_eq!(rates.current(), Some(&slow));
}

#[test]
fn rate_subscribers_get_each_replacement_until_unsubscribed() {
    let mut rates = RateStore::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let fallbacks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let first = rates.subscribe(move |f| sink.borrow_mut().push(f.rate.rate));
    let sink = Rc::clone(&fallbacks);
    let second = rates.subscribe(move |f| sink.borrow_mut().push(f.is_fallback()));

    let live = goalclip::models::FetchedRate {
        rate: rate(dec!(84.25)),
        source: RateSource::Live,
    };
    rates.replace(live.clone());
    assert_eq!(rates.current(), Some(&live));
    rates.replace(goalclip::currency::fallback_rate("offline"));
    assert_eq!(*seen.borrow(), vec![dec!(84.25), FALLBACK_RATE]);
    assert_eq!(*fallbacks.borrow(), vec![false, true]);
    assert_eq!(rates.current().map(|f| f.rate.rate), Some(FALLBACK_RATE));

    assert!(rates.unsubscribe(first));
    assert!(!rates.unsubscribe(first));
    rates.replace(live);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(*fallbacks.borrow(), vec![false, true, false]);

    assert!(rates.unsubscribe(second));
    rates.replace(goalclip::currency::fallback_rate("offline"));
    assert_eq!(fallbacks.borrow().len(), 3);
}
