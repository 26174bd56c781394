//! `glowfly tasks` -- FreeRTOS task table and memory figures, in the
//! shape of the dashboard's stats page.

use std::fmt::Write as _;

use tabled::Tabled;

use glowfly_api::{DeviceClient, TaskReport};
use glowfly_core::units;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{print_output, render_report, render_table};

/// Column width the task name is truncated to.
const NAME_WIDTH: usize = 16;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    number: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Core")]
    core: String,
    #[tabled(rename = "Stack HWM")]
    stack_hwm: u32,
    #[tabled(rename = "Runtime")]
    run_time: u64,
    #[tabled(rename = "%")]
    run_time_pct: String,
}

pub async fn handle(client: &DeviceClient, global: &GlobalOpts) -> Result<(), CliError> {
    let report = client.get_tasks().await?;

    let rendered = render_report(
        &global.output,
        &report,
        || detail(&report),
        || {
            report
                .tasks
                .items
                .iter()
                .map(|t| t.name.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    print_output(&rendered, global.quiet);
    Ok(())
}

pub(crate) fn detail(report: &TaskReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})  fw {} [{}]  built {}",
        report.board_name, report.board_uid, report.fw_version, report.fw_branch, report.build_time
    );
    let _ = writeln!(out, "Time: {} {}\n", report.date, report.time);

    let mut tasks = report.tasks.items.clone();
    tasks.sort_by_key(|t| t.task_number);

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|t| {
            // Collapse "cur / base" when the scheduler hasn't boosted it.
            let priority = if t.cur_priority == t.base_priority {
                t.cur_priority.to_string()
            } else {
                format!("{} / {}", t.cur_priority, t.base_priority)
            };
            TaskRow {
                number: t.task_number,
                name: units::truncate(&t.name, NAME_WIDTH),
                state: t.state.clone(),
                priority,
                core: format!("#{:X}", t.core_affinity),
                stack_hwm: t.stack_high_water_mark,
                run_time: t.run_time,
                run_time_pct: format!("{:.2}", t.run_time_pct),
            }
        })
        .collect();
    out.push_str(&render_table(&rows));
    out.push('\n');

    let _ = writeln!(out, "\nMemory");
    let _ = writeln!(
        out,
        "  Free stack:      {} bytes [stack pointer #{:x}]",
        report.heap.free_stack, report.heap.stack_pointer
    );
    let _ = writeln!(out, "  Total heap:      {} bytes", report.heap.total_heap);
    let _ = writeln!(out, "  Free heap:       {} bytes", report.heap.free_heap);
    let _ = writeln!(
        out,
        "  Log buffer min:  {} bytes",
        report.heap.log_min_buffer_space
    );

    let _ = writeln!(out, "\nRuntime");
    let _ = writeln!(
        out,
        "  System reported: {}",
        report.tasks.sys_total_run_time
    );
    let _ = writeln!(
        out,
        "  Tasks total:     {}",
        report.tasks.tasks_total_run_time
    );
    let _ = writeln!(out, "  Total:           {} ms", report.millis);
    let _ = writeln!(out, "  Cycles 32bit:    {}", report.cycles32);
    let _ = write!(out, "  Cycles 64bit:    {}", report.cycles64);

    out
}
