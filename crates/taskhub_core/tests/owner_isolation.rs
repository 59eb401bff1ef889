use rusqlite::Connection;
use taskhub_core::db::open_db_in_memory;
use taskhub_core::{
    Account, AccountId, AccountRepository, RepoError, SqliteAccountRepository,
    SqliteTaskRepository, TaskFilter, TaskService, TaskStatus,
};

fn seed_account(conn: &Connection, username: &str) -> AccountId {
    let repo = SqliteAccountRepository::try_new(conn).unwrap();
    repo.insert_account(&Account::new(username, "pbkdf2-sha256$1$aa$bb"))
        .unwrap()
}

fn task_service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    TaskService::new(SqliteTaskRepository::try_new(conn).unwrap())
}

#[test]
fn foreign_tasks_are_reported_as_not_found_never_forbidden() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_account(&conn, "alice");
    let bob = seed_account(&conn, "bob");
    let service = task_service(&conn);

    let task = service.create_task(alice, "secret plan", "for alice only").unwrap();

    // Get, delete, and update through another identity all fail the same
    // way a missing id would; existence is not leaked.
    assert!(matches!(
        service.get_task_by_id(bob, task.id),
        Err(RepoError::NotFound(id)) if id == task.id
    ));
    assert!(matches!(
        service.delete_task(bob, task.id),
        Err(RepoError::NotFound(_))
    ));
    assert!(matches!(
        service.update_task_status(bob, task.id, TaskStatus::Done),
        Err(RepoError::NotFound(_))
    ));

    // None of the failed attempts touched the record.
    let intact = service.get_task_by_id(alice, task.id).unwrap();
    assert_eq!(intact.status, TaskStatus::Open);
}

#[test]
fn lists_never_leak_tasks_across_owners() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_account(&conn, "alice");
    let bob = seed_account(&conn, "bob");
    let service = task_service(&conn);

    service.create_task(alice, "alice one", "a").unwrap();
    service.create_task(alice, "alice two", "b").unwrap();
    let bob_task = service.create_task(bob, "bob one", "c").unwrap();

    let alice_tasks = service.get_tasks(alice, &TaskFilter::default()).unwrap();
    assert_eq!(alice_tasks.len(), 2);
    assert!(alice_tasks.iter().all(|task| task.owner == alice));

    let bob_tasks = service.get_tasks(bob, &TaskFilter::default()).unwrap();
    assert_eq!(bob_tasks.len(), 1);
    assert_eq!(bob_tasks[0].id, bob_task.id);

    // A broad search does not widen visibility either.
    let search_all = service
        .get_tasks(
            bob,
            &TaskFilter {
                status: None,
                search: Some("one".to_string()),
            },
        )
        .unwrap();
    assert_eq!(search_all.len(), 1);
    assert_eq!(search_all[0].owner, bob);
}

#[test]
fn same_task_id_is_invisible_to_all_but_the_owner_after_mutations() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_account(&conn, "alice");
    let bob = seed_account(&conn, "bob");
    let service = task_service(&conn);

    let task = service.create_task(alice, "t", "d").unwrap();
    service
        .update_task_status(alice, task.id, TaskStatus::Done)
        .unwrap();

    // Ownership scoping holds on every entry point after state changes.
    assert!(service.get_task_by_id(bob, task.id).is_err());
    assert_eq!(
        service.get_task_by_id(alice, task.id).unwrap().status,
        TaskStatus::Done
    );
}
