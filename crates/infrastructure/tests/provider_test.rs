mod helpers;

use ferrous_resolve_application::ports::{LookupTarget, NameResolutionProvider, ProviderErrorKind};
use ferrous_resolve_infrastructure::dns::HickoryProvider;
use helpers::{
    a_record, aaaa_record, cname_record, mx_record, soa_record, txt_record, MockDnsServer,
    MockZone,
};
use std::time::Duration;
use tokio::net::UdpSocket;

const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(500);

async fn provider_for(zone: MockZone) -> (MockDnsServer, HickoryProvider) {
    let server = MockDnsServer::start(zone).await.unwrap();
    let provider = HickoryProvider::new(vec![server.addr()], ATTEMPT_TIMEOUT);
    (server, provider)
}

#[tokio::test]
async fn test_resolves_a_records() {
    let zone = MockZone::new()
        .record(a_record("example.test", "192.0.2.10"))
        .record(a_record("example.test", "192.0.2.11"));
    let (_server, provider) = provider_for(zone).await;

    let answers = provider
        .resolve_a(&LookupTarget::new("example.test"))
        .await
        .unwrap();

    let ips: Vec<String> = answers.iter().map(|a| a.address.to_string()).collect();
    assert_eq!(ips, vec!["192.0.2.10", "192.0.2.11"]);
    assert_eq!(answers[0].ttl, Some(300));
}

#[tokio::test]
async fn test_resolves_aaaa_records() {
    let zone = MockZone::new().record(aaaa_record("v6.test", "2001:db8::1"));
    let (_server, provider) = provider_for(zone).await;

    let answers = provider
        .resolve_aaaa(&LookupTarget::new("v6.test"))
        .await
        .unwrap();
    assert_eq!(answers[0].address.to_string(), "2001:db8::1");
}

#[tokio::test]
async fn test_cname_target_drops_root_dot() {
    let zone = MockZone::new().record(cname_record("www.example.test", "cdn.example.test"));
    let (_server, provider) = provider_for(zone).await;

    let answers = provider
        .resolve_cname(&LookupTarget::new("www.example.test"))
        .await
        .unwrap();
    assert_eq!(answers[0].name, "cdn.example.test");
}

#[tokio::test]
async fn test_mx_txt_and_soa() {
    let zone = MockZone::new()
        .record(mx_record("mail.test", 10, "mx1.mail.test"))
        .record(txt_record("mail.test", &["v=spf1 ", "-all"]))
        .record(soa_record("mail.test"));
    let (_server, provider) = provider_for(zone).await;
    let target = LookupTarget::new("mail.test");

    let mx = provider.resolve_mx(&target).await.unwrap();
    assert_eq!(mx[0].exchange, "mx1.mail.test");
    assert_eq!(mx[0].preference, 10);

    let txt = provider.resolve_txt(&target).await.unwrap();
    assert_eq!(txt[0].segments, vec!["v=spf1 ", "-all"]);

    let soa = provider.resolve_soa(&target).await.unwrap();
    assert_eq!(soa.mname, "ns1.mail.test");
    assert_eq!(soa.rname, "hostmaster.mail.test");
    assert_eq!(soa.serial, 2024010101);
    assert_eq!(soa.minimum, 300);
}

#[tokio::test]
async fn test_nxdomain_maps_to_not_found() {
    let (_server, provider) = provider_for(MockZone::new().nxdomain("gone.test")).await;

    let err = provider
        .resolve_a(&LookupTarget::new("gone.test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::NotFound);
}

#[tokio::test]
async fn test_servfail_maps_to_server_failure() {
    let (_server, provider) = provider_for(MockZone::new().servfail("broken.test")).await;

    let err = provider
        .resolve_a(&LookupTarget::new("broken.test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::ServerFailure);
}

#[tokio::test]
async fn test_empty_answer_is_no_data() {
    let zone = MockZone::new().record(a_record("only-v4.test", "192.0.2.1"));
    let (_server, provider) = provider_for(zone).await;

    let err = provider
        .resolve_aaaa(&LookupTarget::new("only-v4.test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::NoData);
}

#[tokio::test]
async fn test_truncated_udp_retries_over_tcp() {
    let zone = MockZone::new()
        .record(a_record("big.test", "192.0.2.99"))
        .truncate_udp();
    let (_server, provider) = provider_for(zone).await;

    let answers = provider
        .resolve_a(&LookupTarget::new("big.test"))
        .await
        .unwrap();
    assert_eq!(answers[0].address.to_string(), "192.0.2.99");
}

#[tokio::test]
async fn test_fails_over_to_next_server() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let server = MockDnsServer::start(MockZone::new().record(a_record("up.test", "192.0.2.5")))
        .await
        .unwrap();

    let provider = HickoryProvider::new(
        vec![silent.local_addr().unwrap(), server.addr()],
        Duration::from_millis(100),
    );

    let answers = provider
        .resolve_a(&LookupTarget::new("up.test"))
        .await
        .unwrap();
    assert_eq!(answers[0].address.to_string(), "192.0.2.5");
}

#[tokio::test]
async fn test_all_servers_silent_is_timeout() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let provider =
        HickoryProvider::new(vec![silent.local_addr().unwrap()], Duration::from_millis(50));

    let err = provider
        .resolve_a(&LookupTarget::new("nowhere.test"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Timeout);
}

#[tokio::test]
async fn test_lookup_server_overrides_configured_servers() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let server = MockDnsServer::start(MockZone::new().record(a_record("pin.test", "192.0.2.7")))
        .await
        .unwrap();
    let provider = HickoryProvider::new(vec![silent.local_addr().unwrap()], ATTEMPT_TIMEOUT);

    let override_addr = server.addr().to_string();
    let target = LookupTarget::new("pin.test").with_server(Some(&override_addr));

    let answers = provider.resolve_a(&target).await.unwrap();
    assert_eq!(answers[0].address.to_string(), "192.0.2.7");
}
