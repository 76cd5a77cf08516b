mod support;

use folio_client::HttpTransport;
use folio_contracts::{
    error::{FolioError, FolioResult},
    response::IntakeResponse,
    submission::ContactForm,
};
use folio_core::SubmitTransport;
use support::{log_path, start_server};

fn valid_form() -> ContactForm {
    ContactForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: String::new(),
        subject: "Hello there".to_string(),
        message: "This is a test message.".to_string(),
    }
}

/// `HttpTransport` blocks, so it runs off the runtime's worker threads.
async fn submit(url: String, form: ContactForm) -> FolioResult<IntakeResponse> {
    tokio::task::spawn_blocking(move || HttpTransport::new(url).submit(&form))
        .await
        .expect("submit task")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn accepted_submission_decodes_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = log_path(&dir);
    let addr = start_server(&path, 64 * 1024).await;

    let response = submit(format!("http://{addr}/process_contact"), valid_form())
        .await
        .expect("decoded response");

    assert!(response.success);
    assert_eq!(
        response.message,
        "Thank you for your message! I will get back to you soon."
    );
    assert!(response.errors.is_empty());
    assert!(path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_submission_decodes_field_errors_from_422() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = log_path(&dir);
    let addr = start_server(&path, 64 * 1024).await;

    let form = ContactForm {
        name: "J".to_string(),
        email: "bad".to_string(),
        subject: "hi".to_string(),
        message: "short".to_string(),
        ..ContactForm::default()
    };
    let response = submit(format!("http://{addr}/process_contact"), form)
        .await
        .expect("422 body still decodes");

    assert!(!response.success);
    assert_eq!(response.message, "Please correct the errors below.");
    assert_eq!(response.errors.len(), 4);
    assert!(!path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reply_without_response_schema_is_a_transport_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let addr = start_server(&log_path(&dir), 64 * 1024).await;

    // Unknown paths answer 404 with an empty body.
    let result = submit(format!("http://{addr}/no_such_path"), valid_form()).await;

    match result {
        Err(FolioError::Transport { reason }) => assert!(reason.contains("404"), "{reason}"),
        other => panic!("expected Transport, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn refused_connection_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let result = submit(format!("http://{addr}/process_contact"), valid_form()).await;

    assert!(matches!(result, Err(FolioError::Transport { .. })), "{result:?}");
}
