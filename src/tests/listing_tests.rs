#[cfg(test)]
mod tests {
    use crate::export::{file_export_spec, CSV_MIME};
    use crate::listing::{FileSortKey, ListController, SortDirection, SortKey, UserSortKey};
    use crate::tests::fakes::{file, RecordingSaver};
    use crate::types::{FileRecord, UserRecord};

    const ALL_FILE_KEYS: [FileSortKey; 6] = [
        FileSortKey::Id,
        FileSortKey::Name,
        FileSortKey::Size,
        FileSortKey::UploadedAt,
        FileSortKey::Owner,
        FileSortKey::Description,
    ];

    fn ids(records: &[FileRecord]) -> Vec<i64> {
        records.iter().map(|f| f.id).collect()
    }

    fn mixed_files() -> Vec<FileRecord> {
        vec![
            file(3, "beta.txt", Some(300), Some("2024-03-01T10:00:00Z")),
            file(1, "Alpha.pdf", Some(100), Some("2024-01-01T10:00:00Z")),
            file(4, "gamma.png", None, None),
            file(2, "alpha.doc", Some(100), Some("2024-02-01T10:00:00Z")),
            FileRecord { id: 5, ..FileRecord::default() },
        ]
    }

    #[test]
    fn test_projection_is_a_permutation_for_every_key() {
        let files = mixed_files();
        let mut expected = ids(&files);
        expected.sort();

        for key in ALL_FILE_KEYS {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let projected = ListController::new(key, direction).project(&files);
                let mut got = ids(&projected);
                got.sort();
                assert_eq!(got, expected, "{:?} {:?}", key, direction);
            }
        }
    }

    #[test]
    fn test_descending_is_reverse_of_ascending_without_ties() {
        let files: Vec<FileRecord> = [40, 10, 50, 30, 20]
            .iter()
            .enumerate()
            .map(|(i, size)| file(i as i64 + 1, "f", Some(*size), None))
            .collect();

        let mut asc = ids(&ListController::new(FileSortKey::Size, SortDirection::Ascending).project(&files));
        let desc = ids(&ListController::new(FileSortKey::Size, SortDirection::Descending).project(&files));
        asc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(desc, vec![3, 1, 4, 5, 2]);
    }

    #[test]
    fn test_missing_fields_sort_as_zero_or_empty() {
        let files = mixed_files();

        let by_size = ListController::new(FileSortKey::Size, SortDirection::Ascending).project(&files);
        // 4 and 5 have no size; source order is kept between them
        assert_eq!(ids(&by_size), vec![4, 5, 1, 2, 3]);

        let by_name = ListController::new(FileSortKey::Name, SortDirection::Ascending).project(&files);
        assert_eq!(by_name[0].id, 5);

        let by_date = ListController::new(FileSortKey::UploadedAt, SortDirection::Descending).project(&files);
        assert_eq!(ids(&by_date), vec![3, 2, 1, 4, 5]);
    }

    #[test]
    fn test_ties_keep_source_order_in_both_directions() {
        let files = vec![
            file(1, "a", Some(10), None),
            file(2, "b", Some(10), None),
            file(3, "c", Some(5), None),
            file(4, "d", Some(10), None),
        ];

        let asc = ListController::new(FileSortKey::Size, SortDirection::Ascending).project(&files);
        assert_eq!(ids(&asc), vec![3, 1, 2, 4]);

        let desc = ListController::new(FileSortKey::Size, SortDirection::Descending).project(&files);
        assert_eq!(ids(&desc), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_text_keys_ignore_case() {
        let files = vec![file(1, "beta", None, None), file(2, "Alpha", None, None), file(3, "alpha2", None, None)];
        let projected = ListController::new(FileSortKey::Name, SortDirection::Ascending).project(&files);
        assert_eq!(ids(&projected), vec![2, 3, 1]);
    }

    #[test]
    fn test_upload_time_falls_back_to_created_at() {
        let mut older = file(1, "old", None, None);
        older.created_at = Some("2020-01-01T00:00:00Z".into());
        let newer = file(2, "new", None, Some("2023-01-01T00:00:00Z"));

        let projected =
            ListController::new(FileSortKey::UploadedAt, SortDirection::Ascending).project(&[newer, older]);
        assert_eq!(ids(&projected), vec![1, 2]);
    }

    #[test]
    fn test_projection_leaves_source_untouched() {
        let files = mixed_files();
        let before = files.clone();
        let refs = ListController::new(FileSortKey::Id, SortDirection::Ascending).project_refs(&files);
        assert_eq!(refs.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(files, before);
    }

    #[test]
    fn test_set_sort_key_toggles_and_resets() {
        let mut ctl = ListController::new(FileSortKey::UploadedAt, SortDirection::Descending);

        ctl.set_sort_key(FileSortKey::UploadedAt);
        assert_eq!(ctl.sort_state().direction, SortDirection::Ascending);
        ctl.set_sort_key(FileSortKey::UploadedAt);
        assert_eq!(ctl.sort_state().direction, SortDirection::Descending);

        ctl.set_sort_key(FileSortKey::Size);
        assert_eq!(ctl.sort_state().key, FileSortKey::Size);
        assert_eq!(ctl.sort_state().direction, SortDirection::Ascending);
    }

    #[test]
    fn test_header_marks_only_active_column() {
        let ctl = ListController::new(FileSortKey::Size, SortDirection::Descending);

        let size = ctl.header(FileSortKey::Size, "Size");
        assert!(size.active);
        assert_eq!(size.text(), "Size ↓");

        let name = ctl.header(FileSortKey::Name, "Name");
        assert!(!name.active);
        assert_eq!(name.text(), "Name");
    }

    #[test]
    fn test_user_keys() {
        let users = vec![
            UserRecord { id: 1, is_staff: true, files_total_size: Some(10), ..UserRecord::default() },
            UserRecord { id: 2, is_staff: false, files_total_size: None, ..UserRecord::default() },
            UserRecord { id: 3, is_staff: false, files_total_size: Some(5), ..UserRecord::default() },
        ];

        let by_role = ListController::new(UserSortKey::Role, SortDirection::Ascending).project(&users);
        assert_eq!(by_role.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        let by_size = ListController::new(UserSortKey::TotalSize, SortDirection::Descending).project(&users);
        assert_eq!(by_size.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3, 2]);

        assert_eq!(UserSortKey::Email.extract(&users[0]), crate::listing::SortValue::Text(String::new()));
    }

    #[test]
    fn test_export_saves_projected_rows_as_csv() {
        let files = vec![file(2, "b.txt", Some(2), None), file(1, "a.txt", Some(1), None)];
        let ctl = ListController::new(FileSortKey::Id, SortDirection::Ascending);
        let saver = RecordingSaver::default();

        let projected = ctl.project(&files);
        ctl.export("my_files_x.csv", &file_export_spec(), &projected, &saver);

        let saved = saver.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].filename, "my_files_x.csv");
        assert_eq!(saved[0].mime, CSV_MIME);
        assert_eq!(
            saved[0].text(),
            "id,original_name,size,uploaded_at,description\n1,a.txt,1,,\n2,b.txt,2,,"
        );
    }
}
