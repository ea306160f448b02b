#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use crate::api::{ApiClient, ApiResponse, Method, RequestBody, UploadForm};
    use crate::confirm::{confirm, Confirmed};
    use crate::error::ClientError;
    use crate::tests::fakes::{empty_response, FakeTransport, ScriptedConfirmer};
    use crate::types::{RegisterRequest, UserRecord};

    fn client(transport: &FakeTransport) -> ApiClient<&FakeTransport> {
        ApiClient::new(transport, "/api", Some("tok".into()))
    }

    fn yes() -> Confirmed {
        Confirmed::from_answer(true).unwrap()
    }

    #[test]
    fn test_list_accepts_bare_array_and_envelope() {
        let transport = FakeTransport::new()
            .respond_json(200, json!([{"id": 1}, {"id": 2}]))
            .respond_json(200, json!({"count": 1, "results": [{"id": 3, "original_name": "a"}]}))
            .respond_json(200, json!({"detail": "weird"}))
            .respond_json(200, json!("nope"));
        let api = client(&transport);

        assert_eq!(block_on(api.list_files()).unwrap().len(), 2);
        let enveloped = block_on(api.list_files()).unwrap();
        assert_eq!(enveloped[0].id, 3);
        assert!(block_on(api.list_files()).unwrap().is_empty());
        assert!(block_on(api.list_files()).unwrap().is_empty());
    }

    #[test]
    fn test_list_skips_non_object_elements() {
        let transport = FakeTransport::new().respond_json(200, json!([{"id": 1}, 42, null, {"id": "2"}]));
        let files = block_on(client(&transport).list_files()).unwrap();
        assert_eq!(files.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_html_page_on_json_endpoint_is_a_decode_error() {
        let shell = ApiResponse {
            status: 200,
            headers: vec![("content-type".into(), "text/html".into())],
            body: b"<!doctype html><html></html>".to_vec(),
        };
        let transport = FakeTransport::new().respond(shell.clone()).respond(shell);
        let api = client(&transport);

        assert!(matches!(block_on(api.list_files()), Err(ClientError::Decode(_))));
        assert!(matches!(block_on(api.me()), Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_bearer_header_only_with_token() {
        let transport = FakeTransport::new()
            .respond_json(200, json!({"access": "a", "refresh": "r"}))
            .respond_json(200, json!([]));

        let anonymous = ApiClient::new(&transport, "/api/", None);
        let pair = block_on(anonymous.obtain_token("ann", "pw")).unwrap();
        assert_eq!(pair.access, "a");
        block_on(client(&transport).list_files()).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].url, "/api/token/");
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].authorization(), None);
        assert_eq!(sent[0].body, Some(RequestBody::Json(json!({"username": "ann", "password": "pw"}))));
        assert_eq!(sent[1].authorization().as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn test_base_path_normalization() {
        let transport = FakeTransport::new();
        assert_eq!(ApiClient::new(&transport, "", None).url("/files/"), "/api/files/");
        assert_eq!(
            ApiClient::new(&transport, "https://cloud.example/api/", None).url("/files/"),
            "https://cloud.example/api/files/"
        );
        assert_eq!(ApiClient::new(&transport, "/api", Some(String::new())).token(), None);
    }

    #[test]
    fn test_status_mapping() {
        let transport = FakeTransport::new()
            .respond_json(401, json!({"detail": "no"}))
            .respond_json(403, json!({}))
            .respond_json(404, json!({}))
            .respond_json(400, json!({"detail": "File too large"}))
            .respond_json(500, json!(null));
        let api = client(&transport);

        assert_eq!(block_on(api.list_files()), Err(ClientError::Unauthorized));
        assert_eq!(block_on(api.list_files()), Err(ClientError::Forbidden));
        assert_eq!(block_on(api.list_files()), Err(ClientError::NotFound));
        assert_eq!(
            block_on(api.list_files()),
            Err(ClientError::Http { status: 400, detail: "File too large".into() })
        );
        assert!(matches!(block_on(api.list_files()), Err(ClientError::Http { status: 500, .. })));
    }

    #[test]
    fn test_per_user_files_retry_with_user_id() {
        let transport = FakeTransport::new()
            .respond_json(200, json!([]))
            .respond_json(200, json!({"results": [{"id": 8}]}));

        let files = block_on(client(&transport).admin_list_user_files("5")).unwrap();

        assert_eq!(files.len(), 1);
        let urls: Vec<String> = transport.sent().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["/api/admin/files/?user=5", "/api/admin/files/?user_id=5"]);
    }

    #[test]
    fn test_per_user_files_no_retry_when_filter_works() {
        let transport = FakeTransport::new().respond_json(200, json!([{"id": 1}]));
        block_on(client(&transport).admin_list_user_files("5")).unwrap();
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn test_set_staff_falls_back_to_toggle_action() {
        let transport = FakeTransport::new()
            .respond_json(405, json!({"detail": "Method \"PATCH\" not allowed."}))
            .respond(empty_response(200));
        let user = UserRecord { id: 12, is_staff: false, ..UserRecord::default() };

        block_on(client(&transport).admin_set_staff(&user, true, yes())).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::Patch);
        assert_eq!(sent[0].url, "/api/admin/users/12/");
        assert_eq!(sent[0].body, Some(RequestBody::Json(json!({"is_staff": true}))));
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(sent[1].url, "/api/admin/users/12/toggle_staff/");
    }

    #[test]
    fn test_declined_confirmation_never_reaches_backend() {
        let transport = FakeTransport::new().respond(empty_response(204));
        let api = client(&transport);
        let confirmer = ScriptedConfirmer::new(false);

        if let Some(confirmed) = confirm(&confirmer, "Delete file?") {
            block_on(api.delete_file(1, confirmed)).unwrap();
        }

        assert!(transport.sent().is_empty());
        assert_eq!(*confirmer.asked.borrow(), vec!["Delete file?".to_string()]);
    }

    #[test]
    fn test_confirmed_delete_accepts_empty_body() {
        let transport = FakeTransport::new().respond(empty_response(204)).respond(empty_response(204));
        let api = client(&transport);

        let confirmed = confirm(&ScriptedConfirmer::new(true), "Delete?").unwrap();
        block_on(api.delete_file(4, confirmed)).unwrap();
        block_on(api.admin_delete_user(9, yes())).unwrap();

        let sent = transport.sent();
        assert_eq!((sent[0].method, sent[0].url.as_str()), (Method::Delete, "/api/files/4/"));
        assert_eq!((sent[1].method, sent[1].url.as_str()), (Method::Delete, "/api/admin/users/9/"));
    }

    #[test]
    fn test_admin_actions() {
        let transport = FakeTransport::new()
            .respond(empty_response(200))
            .respond(empty_response(200))
            .respond_json(200, json!({"password": "Xy12-temp"}));
        let api = client(&transport);

        block_on(api.admin_deactivate_user(2, yes())).unwrap();
        block_on(api.admin_send_reset_link(2, yes())).unwrap();
        let temp = block_on(api.admin_issue_temp_password(2, yes())).unwrap();

        assert_eq!(temp.temp_password.as_deref(), Some("Xy12-temp"));
        let sent = transport.sent();
        assert_eq!(sent[0].url, "/api/admin/users/2/deactivate/");
        assert_eq!(sent[1].url, "/api/admin/users/2/send_reset_link/");
        assert_eq!(sent[2].url, "/api/admin/users/2/set_temp_password/");
        assert!(sent.iter().all(|r| r.body == Some(RequestBody::Json(json!({})))));
    }

    #[test]
    fn test_upload_drops_empty_description() {
        let transport = FakeTransport::new().respond_json(201, json!({"id": 5, "original_name": "a.txt"}));
        let form = UploadForm { file_name: "a.txt".into(), bytes: b"hi".to_vec(), description: Some(String::new()) };

        let created = block_on(client(&transport).upload_file(form)).unwrap();

        assert_eq!(created.id, 5);
        match &transport.sent()[0].body {
            Some(RequestBody::Multipart(f)) => {
                assert_eq!(f.file_name, "a.txt");
                assert_eq!(f.description, None);
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[test]
    fn test_share_link_and_description_patch() {
        let transport = FakeTransport::new()
            .respond_json(201, json!({"id": 1, "token": "abc", "url": "/s/abc/"}))
            .respond_json(200, json!({"id": 3, "description": "new"}));
        let api = client(&transport);

        let link = block_on(api.create_share_link(3)).unwrap();
        assert_eq!(link.absolute_url("https://cloud.example"), "https://cloud.example/s/abc/");
        block_on(api.update_description(3, "new")).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].body, Some(RequestBody::Json(json!({"file_id": 3}))));
        assert_eq!(sent[1].method, Method::Patch);
        assert_eq!(sent[1].url, "/api/files/3/");
    }

    #[test]
    fn test_auth_endpoints() {
        let transport = FakeTransport::new()
            .respond_json(201, json!({"id": 1}))
            .respond_json(200, json!({"detail": "sent"}))
            .respond_json(200, json!({}));
        let api = ApiClient::new(&transport, "/api", None);

        let req = RegisterRequest { username: "ann".into(), email: "a@x.io".into(), password: "pw".into() };
        block_on(api.register(&req)).unwrap();
        block_on(api.request_password_reset("a@x.io")).unwrap();
        block_on(api.confirm_password_reset("MQ", "tok-1", "secret")).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].url, "/api/auth/register/");
        assert_eq!(sent[1].body, Some(RequestBody::Json(json!({"email": "a@x.io"}))));
        assert_eq!(sent[2].url, "/api/auth/password/reset-confirm/");
        assert_eq!(
            sent[2].body,
            Some(RequestBody::Json(json!({"uid": "MQ", "token": "tok-1", "new_password": "secret"})))
        );
    }

    #[test]
    fn test_admin_get_user_encodes_id() {
        let transport = FakeTransport::new().respond_json(200, json!({"id": 7, "username": "g"}));
        let user = block_on(client(&transport).admin_get_user("7 ")).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(transport.sent()[0].url, "/api/admin/users/7%20/");
    }
}
