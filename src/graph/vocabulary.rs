//! Stencil and property names used by the editor.

/// Shape stencil ids.
pub mod stencil {
    pub const DIAGRAM: &str = "BPMNDiagram";

    pub const START_NONE: &str = "StartNoneEvent";
    pub const START_TIMER: &str = "StartTimerEvent";
    pub const START_ERROR: &str = "StartErrorEvent";
    pub const START_MESSAGE: &str = "StartMessageEvent";
    pub const START_SIGNAL: &str = "StartSignalEvent";
    pub const START_EVENTS: &[&str] =
        &[START_NONE, START_TIMER, START_ERROR, START_MESSAGE, START_SIGNAL];

    pub const END_NONE: &str = "EndNoneEvent";
    pub const USER_TASK: &str = "UserTask";
    pub const SERVICE_TASK: &str = "ServiceTask";
    pub const SEQUENCE_FLOW: &str = "SequenceFlow";
    pub const EXCLUSIVE_GATEWAY: &str = "ExclusiveGateway";
    pub const PARALLEL_GATEWAY: &str = "ParallelGateway";
    pub const SUB_PROCESS: &str = "SubProcess";
}

/// Shape and document property names.
pub mod property {
    pub const OVERRIDE_ID: &str = "overrideid";
    pub const NAME: &str = "name";
    pub const DOCUMENTATION: &str = "documentation";

    pub const PROCESS_ID: &str = "process_id";
    pub const SLA: &str = "sla";
    pub const SPT: &str = "spt";
    pub const PROCESS_TASK_TITLE: &str = "processtasktitle";

    pub const INITIATOR: &str = "initiator";
    pub const CONDITION_KEYS: &str = "conditionKeys";
    pub const TIMER_DATE: &str = "timerdatedefinition";
    pub const TIMER_DURATION: &str = "timerdurationdefinition";
    pub const TIMER_CYCLE: &str = "timercycledefinition";
    pub const ERROR_REF: &str = "errorref";
    pub const MESSAGE_REF: &str = "messageref";
    pub const SIGNAL_REF: &str = "signalref";

    pub const FORM_KEY: &str = "formkeydefinition";
    pub const FORM_KEY_SHORT: &str = "formkey";
    pub const FORM_KEY_CAMEL: &str = "formKey";
    pub const FORM_REFERENCE: &str = "formreference";

    pub const USER_TASK_ASSIGNMENT: &str = "usertaskassignment";
    pub const ASSIGNMENT: &str = "assignment";
    pub const PRIORITY: &str = "prioritydefinition";
    pub const DUE_DATE: &str = "duedatedefinition";
    pub const CATEGORY: &str = "categorydefinition";

    pub const SLA_NODE: &str = "slanode";
    pub const SPT_NODE: &str = "sptnode";
    pub const SOP_NODE: &str = "sopnode";
    pub const WI_NODE: &str = "winode";
    pub const SUBMIT_PATTERN: &str = "submitpattern";
    pub const SUBMIT_PATTERN_CAMEL: &str = "submitPattern";
    pub const TASK_ACTIVATE_PATTERN: &str = "taskactivatepattern";
    pub const TASK_ACTIVATE_PATTERN_CAMEL: &str = "taskActivatePattern";
    pub const EXECUTION_CONDITION: &str = "executionCondition";

    pub const SERVICE_CLASS: &str = "servicetaskclass";
    pub const SERVICE_EXPRESSION: &str = "servicetaskexpression";
    pub const SERVICE_DELEGATE_EXPRESSION: &str = "servicetaskdelegateexpression";
    pub const SERVICE_RESULT_VARIABLE: &str = "servicetaskresultvariable";
    pub const ASYNCHRONOUS: &str = "asynchronousdefinition";

    pub const CONDITION: &str = "conditionsequenceflow";
}
