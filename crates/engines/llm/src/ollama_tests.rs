use super::*;
use crate::prompt::Role;

fn prompt() -> Prompt {
    Prompt {
        messages: vec![
            Message {
                role: Role::System,
                content: "rules".to_string(),
            },
            Message {
                role: Role::User,
                content: "position".to_string(),
            },
        ],
    }
}

#[test]
fn chat_url_joins_base_without_double_slash() {
    let client = OllamaClient::new(OllamaConfig {
        base_url: "http://localhost:11434/".to_string(),
        ..OllamaConfig::default()
    })
    .unwrap();
    assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
}

#[test]
fn chat_request_disables_streaming_and_asks_for_json() {
    let client = OllamaClient::new(OllamaConfig {
        model: "mistral".to_string(),
        temperature: 0.5,
        ..OllamaConfig::default()
    })
    .unwrap();
    let prompt = prompt();

    let body = serde_json::to_value(client.chat_request(&prompt)).unwrap();

    assert_eq!(body["model"], "mistral");
    assert_eq!(body["stream"], false);
    assert_eq!(body["format"], "json");
    assert_eq!(body["options"]["temperature"], 0.5);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "position");
}

#[test]
fn response_content_is_extracted() {
    let raw = r#"{"model":"phi3","message":{"role":"assistant","content":"{\"a\":1}"},"done":true}"#;
    let chat: ChatResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(chat.message.content, r#"{"a":1}"#);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Nothing listens on the discard port
    let mut client = OllamaClient::new(OllamaConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(5),
        ..OllamaConfig::default()
    })
    .unwrap();

    let err = client.generate(&prompt()).unwrap_err();
    assert!(matches!(err, ModelError::Http(_) | ModelError::Timeout(_)));
}
