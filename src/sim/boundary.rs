// Edge-cell policy applied before each frame's interior update

use crate::ScalarField;

/// Set zero-gradient edges on a velocity component: each edge row/column
/// takes the value of its adjacent interior row/column. Rows are copied
/// first, then columns, so corners come from the column pass.
pub fn mirror_edges(field: &mut ScalarField) {
    let (rows, cols) = field.shape();

    // top & bottom
    let first_row = field.row(1).into_owned();
    field.set_row(0, &first_row);
    let last_row = field.row(rows - 2).into_owned();
    field.set_row(rows - 1, &last_row);

    // left & right
    let first_col = field.column(1).into_owned();
    field.set_column(0, &first_col);
    let last_col = field.column(cols - 2).into_owned();
    field.set_column(cols - 1, &last_col);
}

/// Pin the edges of a pressure field to the edges of the initial pressure.
/// Interior cells are untouched.
///
/// Parameters
/// - `field` - The pressure field of the frame being updated
/// - `initial` - The initial-condition pressure, same shape as `field`
pub fn pin_edges(field: &mut ScalarField, initial: &ScalarField) {
    let (rows, cols) = field.shape();

    field.set_row(0, &initial.row(0));
    field.set_row(rows - 1, &initial.row(rows - 1));
    field.set_column(0, &initial.column(0));
    field.set_column(cols - 1, &initial.column(cols - 1));
}
