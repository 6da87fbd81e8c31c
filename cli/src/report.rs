use std::io::{self, IsTerminal, Write};
use std::path::Path;

use tasktree_core::FullExport;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Console summary printed after a successful export
pub struct ExportReport<'a> {
    export: &'a FullExport,
    path: &'a Path,
}

impl<'a> ExportReport<'a> {
    pub fn new(export: &'a FullExport, path: &'a Path) -> Self {
        Self { export, path }
    }

    pub fn print(&self) -> io::Result<()> {
        let choice = if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_to(&mut stdout)
    }

    pub fn write_to(&self, out: &mut impl WriteColor) -> io::Result<()> {
        let stats = &self.export.meta.stats;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(out, "Export written")?;
        out.reset()?;
        writeln!(out, " to {}", self.path.display())?;

        self.row(
            out,
            "Projects",
            self.export.exported_project_count(),
            stats.total_projects,
        )?;
        self.row(
            out,
            "Tasks",
            self.export.exported_task_count(),
            stats.total_tasks,
        )?;
        writeln!(out, "  {:<9} {}", "Labels", stats.total_labels)?;
        writeln!(out, "  {:<9} {}", "Filters", stats.total_filters)?;

        Ok(())
    }

    fn row(
        &self,
        out: &mut impl WriteColor,
        name: &str,
        exported: usize,
        total: usize,
    ) -> io::Result<()> {
        write!(out, "  {:<9} {}", name, exported)?;
        if exported != total {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, " ({} in snapshot)", total)?;
            out.reset()?;
        }
        writeln!(out)
    }
}
