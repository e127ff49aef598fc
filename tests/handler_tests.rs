//! MCP tool handler tests
mod common;

use common::{extract_id_from_response, get_memory_handler, get_test_handler};
use tasklists_mcp::TaskListServerHandler;
use tasklists_mcp::view::{EMPTY_NO_LISTS, EMPTY_NO_MATCHES, EMPTY_NO_TASKS};

async fn add(handler: &TaskListServerHandler, title: &str) -> String {
    let response = handler
        .handle_add_task(title.to_string(), None, None, None)
        .await
        .unwrap();
    extract_id_from_response(&response)
}

#[tokio::test]
async fn test_lists_shows_default_lists() {
    let (handler, _temp_file) = get_test_handler();

    let result = handler.handle_lists().await.unwrap();

    assert!(result.starts_with("Found 3 list(s):"));
    assert!(result.contains("Work (0) (active)"));
    assert!(result.contains("Personal (0)\n"));
    assert!(result.contains("Shopping (0)\n"));
}

#[tokio::test]
async fn test_create_list_makes_it_active() {
    let (handler, _temp_file) = get_test_handler();

    let response = handler
        .handle_create_list("  Groceries  ".to_string())
        .await
        .unwrap();
    assert!(response.contains("(name: Groceries)"));
    let id = extract_id_from_response(&response);

    assert_eq!(handler.active_list(), Some(id));
    let lists = handler.handle_lists().await.unwrap();
    assert!(lists.contains("Groceries (0) (active)"));
    assert!(lists.contains("Work (0)\n"));
}

#[tokio::test]
async fn test_create_list_rejects_duplicate_and_empty_names() {
    let (handler, _temp_file) = get_test_handler();
    let before = handler.active_list();

    assert!(handler.handle_create_list("work".to_string()).await.is_err());
    assert!(handler.handle_create_list("   ".to_string()).await.is_err());

    assert_eq!(handler.active_list(), before);
    let lists = handler.handle_lists().await.unwrap();
    assert!(lists.starts_with("Found 3 list(s):"));
}

#[tokio::test]
async fn test_select_list() {
    let (handler, _temp_file) = get_test_handler();
    let response = handler
        .handle_create_list("Errands".to_string())
        .await
        .unwrap();
    let errands = extract_id_from_response(&response);

    let response = handler.handle_create_list("Later".to_string()).await.unwrap();
    let later = extract_id_from_response(&response);
    assert_eq!(handler.active_list(), Some(later));

    let result = handler.handle_select_list(errands.clone()).await.unwrap();
    assert!(result.contains("Errands"));
    assert_eq!(handler.active_list(), Some(errands));
}

#[tokio::test]
async fn test_select_unknown_list_fails() {
    let (handler, _temp_file) = get_test_handler();
    let before = handler.active_list();

    let result = handler.handle_select_list("missing".to_string()).await;

    assert!(result.is_err());
    assert_eq!(handler.active_list(), before);
}

#[tokio::test]
async fn test_delete_list_requires_confirmation() {
    let (handler, _temp_file) = get_test_handler();
    add(&handler, "Write report").await;

    let prompt = handler.handle_delete_list(None, None).await.unwrap();
    assert!(prompt.contains("Are you sure"));
    assert!(prompt.contains("\"Work\""));
    assert!(prompt.contains("1 task(s)"));

    let lists = handler.handle_lists().await.unwrap();
    assert!(lists.contains("Work (1) (active)"));

    let declined = handler.handle_delete_list(None, Some(false)).await.unwrap();
    assert!(declined.contains("Are you sure"));
    assert!(handler.handle_lists().await.unwrap().contains("Work (1)"));
}

#[tokio::test]
async fn test_delete_active_list_selects_first_remaining() {
    let (handler, _temp_file) = get_test_handler();

    let result = handler.handle_delete_list(None, Some(true)).await.unwrap();

    assert!(result.contains("(Work) deleted with 0 task(s)"));
    assert!(result.contains("Active list: Personal"));
    let lists = handler.handle_lists().await.unwrap();
    assert!(lists.starts_with("Found 2 list(s):"));
    assert!(lists.contains("Personal (0) (active)"));
    assert!(!lists.contains("Work"));
}

#[tokio::test]
async fn test_delete_inactive_list_keeps_selection() {
    let (handler, _temp_file) = get_test_handler();
    let active = handler.active_list();
    let response = handler
        .handle_create_list("Temporary".to_string())
        .await
        .unwrap();
    let temporary = extract_id_from_response(&response);
    handler
        .handle_select_list(active.clone().unwrap())
        .await
        .unwrap();

    handler
        .handle_delete_list(Some(temporary), Some(true))
        .await
        .unwrap();

    assert_eq!(handler.active_list(), active);
}

#[tokio::test]
async fn test_delete_all_lists_shows_empty_state() {
    let (handler, _temp_file) = get_test_handler();

    handler.handle_delete_list(None, Some(true)).await.unwrap();
    handler.handle_delete_list(None, Some(true)).await.unwrap();
    let last = handler.handle_delete_list(None, Some(true)).await.unwrap();

    assert!(last.contains(EMPTY_NO_LISTS));
    assert_eq!(handler.active_list(), None);
    assert_eq!(handler.handle_lists().await.unwrap(), "No lists found");
    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert_eq!(board.trim(), EMPTY_NO_LISTS);

    // Task tools need a list
    let result = handler
        .handle_add_task("Orphan".to_string(), None, None, None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_unknown_list_fails() {
    let (handler, _temp_file) = get_test_handler();

    let result = handler
        .handle_delete_list(Some("missing".to_string()), Some(true))
        .await;

    assert!(result.is_err());
    assert!(handler.handle_lists().await.unwrap().starts_with("Found 3"));
}

#[tokio::test]
async fn test_add_task_and_show_tasks() {
    let (handler, _temp_file) = get_test_handler();

    let response = handler
        .handle_add_task(
            "  Buy milk  ".to_string(),
            Some("2 liters\nsemi-skimmed".to_string()),
            Some("2999-03-04".to_string()),
            None,
        )
        .await
        .unwrap();
    assert!(response.contains("(title: Buy milk)"));
    let id = extract_id_from_response(&response);

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.starts_with("Work (id: "));
    assert!(board.contains("1 task · 0 completed · 1 active"));
    assert!(board.contains(&format!("- [ ] Buy milk (id: {})", id)));
    assert!(board.contains("  Due: Mar 4, 2999\n"));
    assert!(board.contains("  2 liters\n  semi-skimmed\n"));
}

#[tokio::test]
async fn test_add_task_validation() {
    let (handler, _temp_file) = get_test_handler();

    let empty_title = handler
        .handle_add_task("   ".to_string(), None, None, None)
        .await;
    assert!(empty_title.is_err());

    let bad_date = handler
        .handle_add_task("Task".to_string(), None, Some("next week".to_string()), None)
        .await;
    assert!(bad_date.is_err());

    let unknown_list = handler
        .handle_add_task("Task".to_string(), None, None, Some("missing".to_string()))
        .await;
    assert!(unknown_list.is_err());

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains(EMPTY_NO_TASKS));
}

#[tokio::test]
async fn test_add_task_to_explicit_list() {
    let (handler, _temp_file) = get_test_handler();
    let response = handler
        .handle_create_list("Garden".to_string())
        .await
        .unwrap();
    let garden = extract_id_from_response(&response);
    let lists = handler.handle_lists().await.unwrap();
    let work_line = lists.lines().find(|l| l.contains("Work")).unwrap();
    let work = work_line
        .trim_start_matches("- [")
        .split(']')
        .next()
        .unwrap()
        .to_string();

    handler
        .handle_add_task("Plan sprint".to_string(), None, None, Some(work.clone()))
        .await
        .unwrap();

    // Active list stays the same
    assert_eq!(handler.active_list(), Some(garden));
    let lists = handler.handle_lists().await.unwrap();
    assert!(lists.contains("Work (1)\n"));
    assert!(lists.contains("Garden (0) (active)"));

    let board = handler
        .handle_tasks(Some(work), None, None, None)
        .await
        .unwrap();
    assert!(board.contains("Plan sprint"));
}

#[tokio::test]
async fn test_update_task_keeps_omitted_fields() {
    let (handler, _temp_file) = get_test_handler();
    let response = handler
        .handle_add_task(
            "Draft".to_string(),
            Some("first pass".to_string()),
            Some("2999-01-02T09:30".to_string()),
            None,
        )
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    handler
        .handle_update_task(id.clone(), Some("Final".to_string()), None, None, None)
        .await
        .unwrap();

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains("- [ ] Final"));
    assert!(!board.contains("Draft"));
    assert!(board.contains("  first pass"));
    assert!(board.contains("Due: Jan 2, 2999"));
}

#[tokio::test]
async fn test_update_task_clears_with_empty_string() {
    let (handler, _temp_file) = get_test_handler();
    let response = handler
        .handle_add_task(
            "Draft".to_string(),
            Some("notes".to_string()),
            Some("2999-01-02".to_string()),
            None,
        )
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    handler
        .handle_update_task(
            id,
            None,
            Some(String::new()),
            Some(String::new()),
            None,
        )
        .await
        .unwrap();

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains("- [ ] Draft"));
    assert!(!board.contains("Due:"));
    assert!(!board.contains("notes"));
}

#[tokio::test]
async fn test_update_task_errors() {
    let (handler, _temp_file) = get_test_handler();
    let id = add(&handler, "Keep me").await;

    let missing = handler
        .handle_update_task("missing".to_string(), Some("x".to_string()), None, None, None)
        .await;
    assert!(missing.is_err());

    let empty_title = handler
        .handle_update_task(id.clone(), Some("  ".to_string()), None, None, None)
        .await;
    assert!(empty_title.is_err());

    let bad_date = handler
        .handle_update_task(id, None, None, Some("31/12/2999".to_string()), None)
        .await;
    assert!(bad_date.is_err());

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains("- [ ] Keep me"));
}

#[tokio::test]
async fn test_toggle_task_and_filter() {
    let (handler, _temp_file) = get_test_handler();
    let done = add(&handler, "Done thing").await;
    add(&handler, "Open thing").await;

    let result = handler.handle_toggle_task(done.clone(), None).await.unwrap();
    assert!(result.contains("marked as completed"));

    let all = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(all.contains("2 tasks · 1 completed · 1 active"));
    assert!(all.contains("- [x] Done thing"));

    let completed = handler
        .handle_tasks(None, None, Some("completed".to_string()), None)
        .await
        .unwrap();
    assert!(completed.contains("Done thing"));
    assert!(!completed.contains("Open thing"));

    let active = handler
        .handle_tasks(None, None, Some("active".to_string()), None)
        .await
        .unwrap();
    assert!(active.contains("Open thing"));
    assert!(!active.contains("Done thing"));

    let result = handler.handle_toggle_task(done, None).await.unwrap();
    assert!(result.contains("marked as active"));
}

#[tokio::test]
async fn test_toggle_unknown_task_fails() {
    let (handler, _temp_file) = get_test_handler();

    let result = handler.handle_toggle_task("missing".to_string(), None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_task_requires_confirmation() {
    let (handler, _temp_file) = get_test_handler();
    let id = add(&handler, "Temporary").await;

    let prompt = handler
        .handle_delete_task(id.clone(), None, None)
        .await
        .unwrap();
    assert!(prompt.contains("Are you sure you want to delete \"Temporary\""));
    assert!(handler.handle_tasks(None, None, None, None).await.unwrap().contains("Temporary"));

    let result = handler
        .handle_delete_task(id.clone(), None, Some(true))
        .await
        .unwrap();
    assert!(result.contains("(Temporary) deleted"));

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains(EMPTY_NO_TASKS));

    let again = handler.handle_delete_task(id, None, Some(true)).await;
    assert!(again.is_err());
}

#[tokio::test]
async fn test_tasks_search_and_sort() {
    let (handler, _temp_file) = get_test_handler();
    handler
        .handle_add_task(
            "banana".to_string(),
            Some("yellow fruit".to_string()),
            Some("2999-05-01".to_string()),
            None,
        )
        .await
        .unwrap();
    handler
        .handle_add_task("Apple".to_string(), None, Some("2999-01-01".to_string()), None)
        .await
        .unwrap();
    add(&handler, "cherry").await;

    let by_title = handler
        .handle_tasks(None, None, None, Some("title".to_string()))
        .await
        .unwrap();
    let apple = by_title.find("Apple").unwrap();
    let banana = by_title.find("banana").unwrap();
    let cherry = by_title.find("cherry").unwrap();
    assert!(apple < banana && banana < cherry);

    let by_due = handler
        .handle_tasks(None, None, None, Some("due-date".to_string()))
        .await
        .unwrap();
    let apple = by_due.find("Apple").unwrap();
    let banana = by_due.find("banana").unwrap();
    let cherry = by_due.find("cherry").unwrap();
    assert!(apple < banana && banana < cherry);

    let search = handler
        .handle_tasks(None, Some("  YELLOW ".to_string()), None, None)
        .await
        .unwrap();
    assert!(search.contains("banana"));
    assert!(!search.contains("Apple"));
    // Stats count the whole list
    assert!(search.contains("3 tasks · 0 completed · 3 active"));

    let nothing = handler
        .handle_tasks(None, Some("kiwi".to_string()), None, None)
        .await
        .unwrap();
    assert!(nothing.contains(EMPTY_NO_MATCHES));
}

#[tokio::test]
async fn test_tasks_rejects_unknown_filter_and_sort() {
    let (handler, _temp_file) = get_test_handler();

    assert!(
        handler
            .handle_tasks(None, None, Some("pending".to_string()), None)
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_tasks(None, None, None, Some("priority".to_string()))
            .await
            .is_err()
    );
    assert!(
        handler
            .handle_tasks(Some("missing".to_string()), None, None, None)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_overdue_task_is_highlighted() {
    let (handler, _temp_file) = get_test_handler();
    let id = handler
        .handle_add_task(
            "Pay rent".to_string(),
            None,
            Some("2000-01-15".to_string()),
            None,
        )
        .await
        .map(|r| extract_id_from_response(&r))
        .unwrap();

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains("Due: Overdue - Jan 15 [overdue]"));

    // Completed tasks keep the label but lose the highlight
    handler.handle_toggle_task(id, None).await.unwrap();
    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains("Due: Overdue - Jan 15\n"));
    assert!(!board.contains("[overdue]"));
}

#[tokio::test]
async fn test_changes_survive_reopen() {
    let (handler, temp_file) = get_test_handler();
    handler
        .handle_create_list("Reading".to_string())
        .await
        .unwrap();
    let id = add(&handler, "Dune").await;
    handler.handle_toggle_task(id, None).await.unwrap();
    drop(handler);

    let reopened = TaskListServerHandler::new(temp_file.path().to_str().unwrap()).unwrap();
    let lists = reopened.handle_lists().await.unwrap();
    assert!(lists.starts_with("Found 4 list(s):"));
    assert!(lists.contains("Reading (1)"));
    // The first list is active after a restart
    assert!(lists.contains("Work (0) (active)"));
}

#[tokio::test]
async fn test_failed_save_keeps_change_in_memory() {
    let (handler, storage) = get_memory_handler();
    let saves = storage.save_count();
    storage.set_fail_saves(true);

    let result = handler
        .handle_add_task("Unsaved".to_string(), None, None, None)
        .await;
    assert!(result.is_err());
    assert_eq!(storage.save_count(), saves);

    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.contains("Unsaved"));

    storage.set_fail_saves(false);
    add(&handler, "Saved").await;
    let persisted = storage.snapshot().unwrap();
    assert_eq!(persisted[0].tasks.len(), 2);
}

#[tokio::test]
async fn test_failed_save_on_delete_list_still_reselects() {
    let (handler, storage) = get_memory_handler();
    let deleted = handler.active_list().unwrap();
    storage.set_fail_saves(true);

    let result = handler.handle_delete_list(None, Some(true)).await;
    assert!(result.is_err());

    let lists = handler.handle_lists().await.unwrap();
    assert!(lists.starts_with("Found 2 list(s):"));
    assert!(lists.contains("Personal (0) (active)"));
    assert_ne!(handler.active_list(), Some(deleted));

    // Task tools keep working on the newly active list
    storage.set_fail_saves(false);
    add(&handler, "Still works").await;
    let board = handler.handle_tasks(None, None, None, None).await.unwrap();
    assert!(board.starts_with("Personal (id: "));
    assert!(board.contains("Still works"));
}
