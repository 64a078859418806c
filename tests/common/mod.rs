#![allow(dead_code)]

use serde_json::{Value, json};
use timetable_solver::data::TimetableInput;

/// Three classes over a 5 x 7 week (lunch at 3, final period 6) with a
/// Friday assembly, a shared science lab and a homeroom subject.
pub fn school_json() -> Value {
    json!({
        "scheduleStructure": { "daysPerWeek": 5, "periodsPerDay": 7, "lunchPeriod": 3 },
        "classes": [
            { "level": "M1", "section": "1", "grade": "Grade 7" },
            { "level": "M1", "section": "2", "grade": "Grade 7" },
            { "level": "M2", "section": "1", "grade": "Grade 8" }
        ],
        "teachers": [
            { "id": "kim", "canTeachSubjectIds": ["math", "activity", "assembly"],
              "homeroomClassLabel": "M1-1", "maxPeriodsPerDay": 4, "maxPeriodsPerWeek": 16 },
            { "id": "lee", "canTeachSubjectIds": ["math", "science"],
              "homeroomClassLabel": "M1-2", "maxPeriodsPerDay": 4, "maxPeriodsPerWeek": 16,
              "unavailableSlots": [{ "day": 0, "periods": [0, 1, 2] }] },
            { "id": "park", "canTeachSubjectIds": ["science", "english", "activity", "assembly"],
              "homeroomClassLabel": "M2-1", "maxPeriodsPerDay": 5, "maxPeriodsPerWeek": 18 },
            { "id": "choi", "canTeachSubjectIds": ["english", "art", "activity"],
              "maxPeriodsPerDay": 4, "maxPeriodsPerWeek": 15 },
            { "id": "jung", "canTeachSubjectIds": ["pe", "activity"],
              "maxPeriodsPerDay": 5, "maxPeriodsPerWeek": 20,
              "unavailableSlots": [{ "day": 2, "periods": [4, 5] }] }
        ],
        "subjects": [
            { "id": "math", "periodsPerWeek": { "M1": 5, "M2": 5 } },
            { "id": "science", "requiresSpecialRoom": true, "periodsPerWeek": { "M1": 3, "M2": 3 } },
            { "id": "english", "periodsPerWeek": { "M1": 4, "M2": 4 } },
            { "id": "art", "category": "elective", "preferredTime": "morning", "periodsPerWeek": { "M1": 2, "M2": 1 } },
            { "id": "pe", "category": "elective", "preferredTime": "afternoon", "periodsPerWeek": { "M1": 2, "M2": 2 } },
            { "id": "homeroom", "category": "activity", "periodsPerWeek": { "M1": 1, "M2": 1 } },
            { "id": "assembly", "category": "activity" },
            { "id": "activity", "category": "activity" }
        ],
        "constraints": {
            "subjectPriority": { "math": 10, "science": 9 },
            "specialRooms": [{ "id": "lab", "subjectIds": ["science"] }],
            "maxConsecutivePeriodsPerSubject": 2
        },
        "preAssignedSlots": [
            { "subjectId": "assembly", "day": 4, "period": 6, "domain": "school", "visibility": "all" }
        ]
    })
}

pub fn school() -> TimetableInput {
    serde_json::from_value(school_json()).unwrap()
}
