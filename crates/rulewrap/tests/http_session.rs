use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rulewrap::{ClientConfig, HttpRuleSession, RuleCall, RuleManager, RuleSession, SessionError};
use rulewrap::pipeline::prepare;
use rulewrap::types::{DropZones, User, UserOrGroup};
use rulewrap::RuleError;
use serde_json::{Value, json};

struct MockReply {
    status: u16,
    body: String,
}

/// Read one request, headers and body, from `socket`.
fn read_request(socket: &mut std::net::TcpStream) -> String {
    let mut request = Vec::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = socket.read(&mut buffer).expect("read request");
        if read == 0 {
            break;
        }
        request.extend_from_slice(&buffer[..read]);
        let text = String::from_utf8_lossy(&request);
        if let Some(split) = text.find("\r\n\r\n") {
            let content_length = text[..split]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if request.len() >= split + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&request).to_string()
}

/// Serve `replies` one connection each; every raw request is sent back over
/// the returned channel.
fn spawn_gateway(replies: Vec<MockReply>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let address = listener.local_addr().expect("listener addr");
    let (requests, received) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let (mut socket, _) = listener.accept().expect("accept");
            let request = read_request(&mut socket);
            requests.send(request).expect("report request");

            let status_text = match reply.status {
                200 => "OK",
                401 => "Unauthorized",
                403 => "Forbidden",
                500 => "Internal Server Error",
                _ => "OK",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.status,
                status_text,
                reply.body.len(),
                reply.body
            );
            socket
                .write_all(response.as_bytes())
                .expect("write response");
            socket.flush().expect("flush");
        }
    });

    (format!("http://{}", address), received)
}

fn ok_result(result: Value) -> MockReply {
    MockReply {
        status: 200,
        body: json!({ "outputs": { "*result": result.to_string() } }).to_string(),
    }
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig {
        password: "secret".into(),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    }
    .with_base_url(base_url)
    .expect("valid base url")
}

fn request_body(request: &str) -> Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request has a body");
    serde_json::from_str(body).expect("request body is json")
}

#[tokio::test(flavor = "current_thread")]
async fn posts_body_params_and_credentials() {
    let (base_url, received) = spawn_gateway(vec![ok_result(json!({
        "account_type": "rodsuser",
        "userName": "jmelius",
        "userId": "10068",
        "displayName": "Jonathan Melius"
    }))]);
    let manager = RuleManager::connect(&config(&base_url)).expect("connect");

    let account = manager.get_user_or_group("10068").await.expect("lookup");
    assert_eq!(
        account,
        UserOrGroup::User(User {
            user_name: "jmelius".into(),
            user_id: "10068".into(),
            display_name: "Jonathan Melius".into(),
        })
    );

    let request = received.recv().expect("request captured");
    let first_line = request.lines().next().unwrap_or_default();
    assert!(first_line.starts_with("POST /rules/execute"), "{first_line}");
    let lowered = request.to_ascii_lowercase();
    assert!(lowered.contains("x-rule-zone: nlmumc"), "{request}");
    // base64("rods:secret")
    assert!(request.contains("cm9kczpzZWNyZXQ="), "{request}");

    let body = request_body(&request);
    assert_eq!(
        body["body"],
        "execute_rule{\nget_user_or_group_by_id(*arg1,*result);\n}"
    );
    assert_eq!(body["params"], json!({ "*arg1": "\"10068\"", "*result": "\"\"" }));
    assert_eq!(body["output"], "*result");
}

#[tokio::test(flavor = "current_thread")]
async fn composes_typed_results_over_http() {
    let (base_url, _received) = spawn_gateway(vec![ok_result(json!([
        {
            "token": "crazy-frog",
            "project": "P000000010",
            "title": "Scans",
            "state": "open",
            "type": "mounted",
            "sharedWithMe": "false",
            "enableDropzoneSharing": "true"
        }
    ]))]);
    let manager = RuleManager::connect(&config(&base_url)).expect("connect");

    let zones: DropZones = manager.get_active_drop_zones(false).await.expect("zones");
    assert_eq!(zones.len(), 1);
    let zone = zones.iter().next().unwrap();
    assert!(!zone.shared_with_me);
    assert!(zone.enable_dropzone_sharing);
}

#[tokio::test(flavor = "current_thread")]
async fn maps_http_failures_to_session_errors() {
    let (base_url, _received) = spawn_gateway(vec![
        MockReply {
            status: 401,
            body: json!({ "error": "CAT_INVALID_AUTHENTICATION" }).to_string(),
        },
        MockReply {
            status: 500,
            body: "rule get_projects failed".into(),
        },
        MockReply {
            status: 200,
            body: json!({ "outputs": {} }).to_string(),
        },
    ]);
    let session = HttpRuleSession::new(&config(&base_url)).expect("session");
    let rule = prepare(&RuleCall::new("get_projects").arg(false).with_result());

    let err = session.execute(&rule).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Authentication("CAT_INVALID_AUTHENTICATION".into())
    );

    let err = session.execute(&rule).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Remote {
            status: 500,
            message: "rule get_projects failed".into()
        }
    );

    let manager = RuleManager::with_ttl(session, Duration::from_secs(600));
    let err = manager
        .call(RuleCall::new("get_projects").arg(false).with_result())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuleError::Session(SessionError::MissingOutput { ref slot }) if slot == "*result"
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn unreachable_gateway_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let address = listener.local_addr().expect("listener addr");
    drop(listener);

    let session = HttpRuleSession::new(&config(&format!("http://{address}"))).expect("session");
    let rule = prepare(&RuleCall::new("get_all_users").with_result());
    let err = session.execute(&rule).await.unwrap_err();
    assert!(matches!(err, SessionError::Transport(_)), "{err:?}");
}
