mod helpers;

use autolot_core::AppError;
use autolot_db::ListingRepository;
use autolot_services::{AssetUploader, ClientContext, ImagePayload, ListingComposer, UploadSession};
use autolot_storage::MemoryBlobStore;
use helpers::{jpeg_payload, test_env, test_identity, valid_form, ScriptedDocumentStore};
use std::sync::Arc;

async fn session_with_images(
    uploader: &AssetUploader,
    ctx: &ClientContext,
    count: usize,
) -> UploadSession {
    let session = UploadSession::new();
    for _ in 0..count {
        let (content_type, data) = jpeg_payload();
        uploader
            .dispatch_upload(&session, &ctx.identity, ImagePayload::new(content_type, data))
            .join()
            .await
            .unwrap()
            .unwrap();
    }
    session
}

#[tokio::test]
async fn submit_composes_one_record_from_the_session() {
    let env = test_env();
    let uploader = AssetUploader::for_context(&env.ctx);
    let session = session_with_images(&uploader, &env.ctx, 2).await;
    let session_images = session.images();

    let composer = ListingComposer::new(env.ctx.clone());
    let record = composer.submit(&valid_form(), &session).await.unwrap();

    // Name is upper-cased; everything else is persisted verbatim.
    assert_eq!(record.name, "GOL G4");
    assert_eq!(record.model, "1.0");
    assert_eq!(record.year, "2016");
    assert_eq!(record.km, "30000");
    assert_eq!(record.price, "25000");
    assert_eq!(record.city, "Piracicaba");
    assert_eq!(record.whatsapp, "11999998888");
    assert_eq!(record.description, "ok");
    assert_eq!(record.owner_id, "owner-1");
    assert_eq!(record.owner_name.as_deref(), Some("Test Owner"));

    // Image count equals the session's count at submit time, in order.
    assert_eq!(record.images, session_images);

    // Exactly one record was written and the session was consumed.
    assert_eq!(env.docs.len("listings").await, 1);
    assert!(session.is_empty());

    // Round-trip through the store is lossless.
    let fetched = env.ctx.listings.get(&record.id).await.unwrap().unwrap();
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn submit_with_zero_images_never_contacts_the_store() {
    let docs = Arc::new(ScriptedDocumentStore::new());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs.clone()),
        Arc::new(MemoryBlobStore::new()),
    );

    let composer = ListingComposer::new(ctx);
    let result = composer.submit(&valid_form(), &UploadSession::new()).await;

    assert!(matches!(result, Err(AppError::MissingAssets)));
    assert_eq!(docs.creates(), 0);
}

#[tokio::test]
async fn submit_with_invalid_form_never_contacts_the_store() {
    let docs = Arc::new(ScriptedDocumentStore::new());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs.clone()),
        Arc::new(MemoryBlobStore::new()),
    );
    let uploader = AssetUploader::for_context(&ctx);
    let session = session_with_images(&uploader, &ctx, 1).await;

    let mut form = valid_form();
    form.whatsapp = "123".to_string();

    let composer = ListingComposer::new(ctx);
    let result = composer.submit(&form, &session).await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert_eq!(docs.creates(), 0);
    // Validation failure must not consume the uploads.
    assert_eq!(session.len(), 1);
}

#[tokio::test]
async fn failed_write_leaves_the_session_for_retry() {
    let docs = Arc::new(ScriptedDocumentStore::failing_creates());
    let ctx = ClientContext::new(
        test_identity(),
        ListingRepository::new(docs.clone()),
        Arc::new(MemoryBlobStore::new()),
    );
    let uploader = AssetUploader::for_context(&ctx);
    let session = session_with_images(&uploader, &ctx, 2).await;

    let composer = ListingComposer::new(ctx);
    let result = composer.submit(&valid_form(), &session).await;

    assert!(matches!(result, Err(AppError::StoreWrite(_))));
    // The user can retry the write without re-uploading images.
    assert_eq!(session.len(), 2);
}

#[tokio::test]
async fn twelve_digit_whatsapp_is_accepted() {
    let env = test_env();
    let uploader = AssetUploader::for_context(&env.ctx);
    let session = session_with_images(&uploader, &env.ctx, 1).await;

    let mut form = valid_form();
    form.whatsapp = "551187654321".to_string();

    let composer = ListingComposer::new(env.ctx.clone());
    let record = composer.submit(&form, &session).await.unwrap();
    assert_eq!(record.whatsapp, "551187654321");
}
