use budget_splits::grid::{Column, GridCursor, GridEvent, GridKey, GridLayout};

fn layout() -> GridLayout {
    GridLayout::new(5, true, true, true)
}

fn press(cursor: &mut GridCursor, key: GridKey) -> Option<GridEvent> {
    cursor.handle(key, &layout())
}

fn editing(row: usize, column: Column) -> GridCursor {
    let mut cursor = GridCursor::new();
    cursor.edit(row, column, &layout()).expect("cell is editable");
    cursor
}

#[test]
fn enter_and_tab_move_down_and_right() {
    let mut cursor = editing(2, Column::Notes);
    press(&mut cursor, GridKey::Enter);
    assert_eq!(cursor.focus(), Some((3, Column::Notes)));
    assert!(cursor.is_editing());

    let mut cursor = editing(2, Column::Payee);
    press(&mut cursor, GridKey::Tab);
    assert_eq!(cursor.focus(), Some((2, Column::Notes)));
}

#[test]
fn shift_moves_up_and_left() {
    let mut cursor = editing(2, Column::Notes);
    press(&mut cursor, GridKey::ShiftEnter);
    assert_eq!(cursor.focus(), Some((1, Column::Notes)));

    let mut cursor = editing(2, Column::Payee);
    press(&mut cursor, GridKey::ShiftTab);
    assert_eq!(cursor.focus(), Some((2, Column::Account)));
}

#[test]
fn tab_wraps_between_rows() {
    let mut cursor = editing(2, Column::Cleared);
    press(&mut cursor, GridKey::Tab);
    assert_eq!(cursor.focus(), Some((3, Column::Select)));

    let mut cursor = editing(2, Column::Select);
    press(&mut cursor, GridKey::ShiftTab);
    assert_eq!(cursor.focus(), Some((1, Column::Cleared)));
}

#[test]
fn blur_closes_the_editor_and_commits() {
    let mut cursor = editing(1, Column::Credit);
    cursor.input("12.00");
    let event = press(&mut cursor, GridKey::Blur);
    assert_eq!(
        event,
        Some(GridEvent::Commit {
            row: 1,
            column: Column::Credit,
            value: "12.00".into(),
        })
    );
    assert!(!cursor.is_editing());
}

#[test]
fn moving_away_saves_text_fields() {
    for key in [GridKey::Tab, GridKey::Enter, GridKey::ShiftTab, GridKey::ShiftEnter] {
        let mut cursor = editing(2, Column::Notes);
        cursor.input("a happy little note");
        let event = press(&mut cursor, key);
        assert_eq!(
            event,
            Some(GridEvent::Commit {
                row: 2,
                column: Column::Notes,
                value: "a happy little note".into(),
            }),
            "key {key:?}"
        );
        assert_eq!(cursor.pending(), None);
    }
}

#[test]
fn reaching_the_edges_does_not_fail() {
    let mut cursor = editing(4, Column::Notes);
    assert_eq!(press(&mut cursor, GridKey::Enter), None);
    assert_eq!(cursor.focus(), Some((4, Column::Notes)));

    let mut cursor = editing(0, Column::Notes);
    press(&mut cursor, GridKey::ShiftEnter);
    assert_eq!(cursor.focus(), Some((0, Column::Notes)));
}

#[test]
fn shrinking_grid_clamps_focus() {
    let mut cursor = editing(4, Column::Date);
    let smaller = layout().with_rows(2);
    cursor.handle(GridKey::ShiftEnter, &smaller);
    assert_eq!(cursor.focus(), Some((0, Column::Date)));
}
