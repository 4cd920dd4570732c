//! Note Endpoints

use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Note, NotePayload, NotesResponse};

impl ApiClient {
    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response: NotesResponse = self.get("/notes").await?;
        Ok(response.notes)
    }

    pub async fn create_note(&self, payload: &NotePayload) -> Result<Value, ApiError> {
        self.post("/notes", payload).await
    }

    pub async fn update_note(&self, id: u32, payload: &NotePayload) -> Result<Value, ApiError> {
        self.put(&format!("/notes/{}", id), payload).await
    }

    /// Server flips `isPinned`
    pub async fn toggle_pin(&self, id: u32) -> Result<Value, ApiError> {
        self.patch(&format!("/notes/{}", id), &()).await
    }

    pub async fn delete_note(&self, id: u32) -> Result<Value, ApiError> {
        self.delete(&format!("/notes/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::api::mock::MockTransport;
    use crate::api::{ApiClient, Method};
    use crate::session::{MemoryStore, Session};

    fn client(mock: &Rc<MockTransport>) -> ApiClient {
        ApiClient::new("/api", Session::new(MemoryStore::default()), mock.clone())
    }

    #[tokio::test]
    async fn test_list_notes_unwraps_envelope() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"notes":[{"id":7,"title":"a","content":"abc","tags":[],"isPinned":false}]}"#);

        let notes = client(&mock).list_notes().await.unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, 7);
    }

    #[tokio::test]
    async fn test_note_routes() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        mock.respond(200, "{}");
        mock.respond(200, r#"{"message":"deleted"}"#);

        api.toggle_pin(3).await.unwrap();
        api.delete_note(7).await.unwrap();

        let sent = mock.requests();
        assert_eq!((sent[0].method, sent[0].url.as_str()), (Method::Patch, "/api/notes/3"));
        assert_eq!((sent[1].method, sent[1].url.as_str()), (Method::Delete, "/api/notes/7"));
    }
}
