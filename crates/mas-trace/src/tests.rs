//! Integration tests for mas-trace.

#[cfg(test)]
mod csv_tests {
    use std::f64::consts::PI;
    use std::sync::Arc;

    use mas_body::{AgentBody, Frustum, Influence, Percept};
    use mas_core::{ObjectId, Point2d, Shape2d, Vector2d};
    use mas_env::{ContinuousWorld, Environment};
    use mas_object::{MotionLimits, ObjectKind};
    use tempfile::TempDir;

    use crate::csv::CsvTrace;
    use crate::row::SnapshotRow;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn scout(name: &str) -> AgentBody {
        let mut body = AgentBody::new(
            ObjectId::random(),
            Shape2d::point(),
            MotionLimits::new(10.0, 5.0, PI, PI),
            Frustum::circle(50.0),
        );
        body.set_name(name);
        body
    }

    #[test]
    fn header_written_on_create() {
        let dir = tmp();
        let path = dir.path().join("trace.csv");
        let trace = CsvTrace::create(&path).unwrap();
        trace.flush().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["time", "id", "kind", "name", "x", "y", "angle", "speed"]);
    }

    #[test]
    fn notified_ticks_append_rows() {
        let dir = tmp();
        let path = dir.path().join("trace.csv");
        let trace = Arc::new(CsvTrace::create(&path).unwrap());

        let mut env = Environment::new(100.0, 100.0, 1000.0, ContinuousWorld::new());
        let body = scout("walker");
        let id = body.id();
        env.register_body(body, Point2d::new(50.0, 50.0), 0.0).unwrap();
        env.add_listener(trace.clone());

        env.step(); // forced initial notification
        env.step(); // quiet tick: no rows
        env.submit_influence(id, Influence::kinematic(Vector2d::new(2.0, 0.0), 0.0));
        env.step(); // changed tick: one more row

        assert!(trace.take_error().is_none());
        trace.flush().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2, "one row per notified tick for a single body");

        assert_eq!(&rows[0][0], "1");      // time after tick 1
        assert_eq!(&rows[0][2], "body");   // kind
        assert_eq!(&rows[0][3], "walker"); // name
        assert_eq!(&rows[0][4], "50");     // x before the move
        assert_eq!(&rows[1][0], "3");      // time after tick 3
        assert_eq!(&rows[1][4], "52");     // x after the move
        assert_eq!(&rows[1][7], "2");      // realized speed
    }

    #[test]
    fn unnamed_objects_leave_name_blank() {
        let dir = tmp();
        let path = dir.path().join("trace.csv");
        let trace = Arc::new(CsvTrace::create(&path).unwrap());

        let mut env = Environment::new(100.0, 100.0, 1000.0, ContinuousWorld::new());
        let body = AgentBody::new(
            ObjectId::random(),
            Shape2d::point(),
            MotionLimits::new(10.0, 5.0, PI, PI),
            Frustum::circle(50.0),
        );
        env.register_body(body, Point2d::new(25.0, 75.0), 0.0).unwrap();
        env.add_listener(trace.clone());

        env.step();
        trace.flush().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "");
    }

    #[test]
    fn snapshot_row_flattens_a_percept() {
        let body = scout("probe");
        let percept = Percept::of_body(&body);
        let row = SnapshotRow::new(2.5, &percept);

        assert_eq!(row.time, 2.5);
        assert_eq!(row.id, body.id());
        assert_eq!(row.kind, ObjectKind::Body);
        assert_eq!(row.name.as_deref(), Some("probe"));
        assert_eq!(row.x, 0.0);
        assert_eq!(row.y, 0.0);
        assert_eq!(row.speed, 0.0);
    }
}
