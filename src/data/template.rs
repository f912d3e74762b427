//! The built-in example procedure seeded into fresh accounts: a polishing
//! experiment from specimen preparation through analysis, closed by a
//! decision node that loops back depending on specimen stock.

use crate::workflow::{
    ContentType, DecisionOption, StepContent, SubProcess, WorkflowDefinition, WorkflowEdge,
    WorkflowNode,
};

/// A complete workflow new projects start from.
pub fn default_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        nodes: vec![
            WorkflowNode::process("step-1", "1. Specimen preparation")
                .with_icon("ClipboardList")
                .with_sub_processes(vec![
                    SubProcess::new("1.1", "Specimen purchase").with_contents(vec![
                        StepContent::text_item(
                            "c-1-1-1",
                            "Check stock, then request an order from the supervisor.",
                        ),
                    ]),
                    SubProcess::new("1.2", "Specimen machining").with_contents(vec![
                        StepContent::text_item(
                            "c-1-2-1",
                            "Wire-cut the blank, then groove it on the multi-axis mill.",
                        ),
                        StepContent::text_item("c-1-2-2", "Roughness check (ymin 200 +/- 5 um)."),
                    ]),
                    SubProcess::new("1.3", "Specimen measurement").with_contents(vec![
                        StepContent::text_item(
                            "c-1-3-1",
                            "Profile gauge (x = 0 datum, groove center) and roughness gauge \
                             (3 points in the groove). Copy data to the server via USB.",
                        ),
                        StepContent::new(
                            "c-1-3-2",
                            ContentType::Warning,
                            "Measurement method differs between years; confirm before starting.",
                        ),
                        StepContent::new(
                            "c-1-3-3",
                            ContentType::Warning,
                            "Let the specimen reach thermal equilibrium overnight.",
                        ),
                    ]),
                ]),
            WorkflowNode::process("step-2", "2. Workpiece preparation")
                .with_icon("Box")
                .with_sub_processes(vec![
                    SubProcess::new("2.1", "Cleaning and initial weighing").with_contents(vec![
                        StepContent::text_item(
                            "c-2-1-1",
                            "Ultrasonic clean, air-blow dry, weigh three times, record in the \
                             spreadsheet and back up.",
                        ),
                    ]),
                ]),
            WorkflowNode::process("step-3", "3. Rig setup")
                .with_icon("Settings")
                .with_sub_processes(vec![
                    SubProcess::new("3.1", "Power up").with_contents(vec![
                        StepContent::text_item(
                            "c-3-1-1",
                            "Motor, monitor, PC, torque meter and timer on. Field supply too \
                             when running with an applied field.",
                        ),
                    ]),
                    SubProcess::new("3.2", "Mount workpiece and zero").with_contents(vec![
                        StepContent::text_item(
                            "c-3-2-1",
                            "Clamp the jig, connect the continuity tester, find the zero point \
                             on the Z axis and record the coordinates.",
                        ),
                    ]),
                    SubProcess::new("3.3", "Stage teaching").with_contents(vec![
                        StepContent::text_item("c-3-3-1", "Program the -10.00 mm travel."),
                        StepContent::new(
                            "c-3-3-2",
                            ContentType::Check,
                            "Uncheck the auto-return box (point and confirm).",
                        ),
                        StepContent::text_item("c-3-3-3", "Wire up the ammeter."),
                    ]),
                ]),
            WorkflowNode::process("step-4", "4. Slurry application")
                .with_icon("Droplet")
                .with_sub_processes(vec![
                    SubProcess::new("4.1", "Preparation").with_contents(vec![
                        StepContent::text_item(
                            "c-4-1-1",
                            "Trim the pipette, weigh the total, compute the application amount.",
                        ),
                    ]),
                    SubProcess::new("4.2", "Apply and level").with_contents(vec![
                        StepContent::text_item(
                            "c-4-2-1",
                            "Spin at 200 rpm, apply within +/- 0.3 g, level with the stage, set \
                             the height, zero the torque meter.",
                        ),
                    ]),
                ]),
            WorkflowNode::process("step-5", "5. Polishing run")
                .with_icon("PlayCircle")
                .with_sub_processes(vec![
                    SubProcess::new("5.1", "Run").with_contents(vec![
                        StepContent::text_item(
                            "c-5-1-1",
                            "Table feed on, start monitor recording, start stopwatch and motor \
                             (and field, if applied).",
                        ),
                    ]),
                    SubProcess::new("5.2", "On anomaly").with_contents(vec![
                        StepContent::new(
                            "c-5-2-1",
                            ContentType::Warning,
                            "On a stall, note the time and abort. Abort on unstable current \
                             too. Save the data either way.",
                        ),
                    ]),
                ]),
            WorkflowNode::process("step-6", "6. Teardown and data capture")
                .with_icon("Save")
                .with_sub_processes(vec![
                    SubProcess::new("6.1", "Shutdown").with_contents(vec![
                        StepContent::text_item(
                            "c-6-1-1",
                            "Stop rotation, stop recording, power off, remove the workpiece.",
                        ),
                    ]),
                    SubProcess::new("6.2", "Post-run measurement").with_contents(vec![
                        StepContent::text_item(
                            "c-6-2-1",
                            "Clean (6 min), dry, weigh three times, enter the values.",
                        ),
                    ]),
                    SubProcess::new("6.3", "Data filing").with_contents(vec![
                        StepContent::text_item(
                            "c-6-3-1",
                            "Save under the naming convention (delta-n-V-t).",
                        ),
                    ]),
                    SubProcess::new("6.4", "Wrap up").with_contents(vec![
                        StepContent::text_item(
                            "c-6-4-1",
                            "Tidy the bench, power off, store the specimen for tomorrow's \
                             measurement.",
                        ),
                    ]),
                ]),
            WorkflowNode::process("step-7", "7. Analysis")
                .with_icon("Monitor")
                .with_sub_processes(vec![
                    SubProcess::new("7.1", "Post-experiment measurement").with_contents(vec![
                        StepContent::text_item("c-7-1-1", "Two-dimensional measurement."),
                    ]),
                    SubProcess::new("7.2", "Analysis software").with_contents(vec![
                        StepContent::text_item(
                            "c-7-2-1",
                            "Open the file, inspect the data, run roundness and roughness \
                             analysis over the selected range, label the axes, save the plots.",
                        ),
                    ]),
                ]),
            WorkflowNode::decision(
                "decision-loop",
                "Next experiment?",
                vec![
                    DecisionOption::new("No specimen left (back to preparation)", "step-1"),
                    DecisionOption::new("Specimen in stock (back to workpiece prep)", "step-2"),
                ],
            )
            .with_sub_processes(vec![
                SubProcess::new("loop-check", "Specimen stock check").with_contents(vec![
                    StepContent::text_item(
                        "c-loop-1",
                        "After the run, check whether a specimen is available for the next \
                         experiment.",
                    ),
                ]),
            ]),
        ],
        edges: vec![
            WorkflowEdge::new("e1-2", "step-1", "step-2"),
            WorkflowEdge::new("e2-3", "step-2", "step-3"),
            WorkflowEdge::new("e3-4", "step-3", "step-4"),
            WorkflowEdge::new("e4-5", "step-4", "step-5"),
            WorkflowEdge::new("e5-6", "step-5", "step-6"),
            WorkflowEdge::new("e6-7", "step-6", "step-7"),
            WorkflowEdge::new("e7-d", "step-7", "decision-loop"),
            WorkflowEdge::new("ed-1", "decision-loop", "step-1"),
            WorkflowEdge::new("ed-2", "decision-loop", "step-2"),
        ],
        groups: Vec::new(),
    }
}
