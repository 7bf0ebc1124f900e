use chemeng::{Solution, Stoichiometry};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// Elements down, molecules across, with the balanced coefficients as the last row
    pub fn format_element_balance(&self, stoichiometry: &Stoichiometry) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);

        let mut header = vec![Cell::new("Element").set_alignment(CellAlignment::Left)];
        header.extend(
            stoichiometry
                .molecules
                .iter()
                .map(|molecule| Cell::new(molecule).set_alignment(CellAlignment::Right)),
        );
        table.set_header(Row::from(header));

        for (element, counts) in &stoichiometry.element_balance {
            let mut row = vec![Cell::new(element)];
            row.extend(
                counts
                    .iter()
                    .map(|count| Cell::new(count).set_alignment(CellAlignment::Right)),
            );
            table.add_row(Row::from(row));
        }

        let mut coefficients = vec![Cell::new("coefficient")];
        coefficients.extend(
            stoichiometry
                .balance
                .iter()
                .map(|value| Cell::new(format!("{:?}", value)).set_alignment(CellAlignment::Right)),
        );
        table.add_row(Row::from(coefficients));

        format!("{}\n", table)
    }

    pub fn format_solution(&self, solution: &Solution) -> String {
        let mut output = format!("{}\n", solution);
        if solution.roots.is_empty() {
            output.push_str(&format!(
                "No sign change found for '{}' in the search range\n",
                solution.unknown
            ));
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Bracket").set_alignment(CellAlignment::Left),
            Cell::new(&solution.unknown).set_alignment(CellAlignment::Right),
        ]));
        for ((lo, hi), root) in solution.brackets.iter().zip(&solution.roots) {
            table.add_row(Row::from(vec![
                Cell::new(format!("[{}, {}]", lo, hi)),
                Cell::new(root).set_alignment(CellAlignment::Right),
            ]));
        }

        output.push_str(&format!(
            "{}\nRounded to {} significant figures\n",
            table, solution.sigfigs
        ));
        output
    }
}
