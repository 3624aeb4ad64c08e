#[cfg(test)]
mod tests {
    use crate::booking::BookingService;
    use crate::error::SchedulingError;
    use crate::mock::MemoryStore;
    use crate::slots::SlotService;
    use chrono::{TimeZone, Utc};
    use tutorlink_common::models::{SlotId, SlotStatus, SubjectId};
    use tutorlink_common::SessionContext;
    use tutorlink_db::SubjectRepository;

    struct Fixture {
        store: MemoryStore,
        slots: SlotService<MemoryStore>,
        bookings: BookingService<MemoryStore>,
        tutor_session: SessionContext,
        slot_id: SlotId,
        subject_id: SubjectId,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let slots = SlotService::new(store.clone());
        let bookings = BookingService::new(store.clone());
        let (tutor_session, tutor) = store.seed_tutor("tutor@example.com").await;
        let subject = store.insert_subject(tutor.id, "Statistics").await.unwrap();
        let starts_at = Utc.with_ymd_and_hms(2024, 12, 10, 2, 0, 0).unwrap();
        let slot = slots.create(&tutor_session, starts_at).await.unwrap();

        Fixture {
            store,
            slots,
            bookings,
            tutor_session,
            slot_id: slot.id,
            subject_id: subject.id,
        }
    }

    #[tokio::test]
    async fn test_book_available_slot() {
        let f = fixture().await;
        let (tutee_session, tutee) = f.store.seed_tutee("a@example.com").await;

        assert_eq!(f.bookings.status(f.slot_id).await.unwrap(), SlotStatus::Available);

        let booking = f.bookings.book(&tutee_session, f.slot_id, None).await.unwrap();
        assert_eq!(booking.tutee_id, tutee.id);
        assert_eq!(booking.subject_id, f.subject_id);
        assert_eq!(booking.slot_id, f.slot_id);
        assert_eq!(
            booking.booked_for,
            Utc.with_ymd_and_hms(2024, 12, 10, 2, 0, 0).unwrap()
        );

        assert_eq!(f.bookings.status(f.slot_id).await.unwrap(), SlotStatus::Booked);
    }

    #[tokio::test]
    async fn test_second_tutee_gets_conflict_and_no_row() {
        let f = fixture().await;
        let (a, _) = f.store.seed_tutee("a@example.com").await;
        let (b, _) = f.store.seed_tutee("b@example.com").await;

        f.bookings.book(&a, f.slot_id, None).await.unwrap();
        let err = f.bookings.book(&b, f.slot_id, None).await.unwrap_err();

        assert!(matches!(err, SchedulingError::Conflict(_)));
        assert_eq!(f.store.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_race_past_stale_check_still_conflicts() {
        let f = fixture().await;
        let (a, _) = f.store.seed_tutee("a@example.com").await;
        let (b, _) = f.store.seed_tutee("b@example.com").await;
        f.bookings.book(&a, f.slot_id, None).await.unwrap();

        // B's availability check misses A's booking; the store constraint catches it.
        f.store.set_stale_booking_reads(true);
        let err = f.bookings.book(&b, f.slot_id, None).await.unwrap_err();

        assert!(matches!(err, SchedulingError::Conflict(m) if m.contains("already booked")));
        assert_eq!(f.store.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_book_requires_tutee() {
        let f = fixture().await;

        let err = f
            .bookings
            .book(&SessionContext::anonymous(), f.slot_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Authorization(_)));

        let err = f
            .bookings
            .book(&f.tutor_session, f.slot_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Authorization(_)));
        assert_eq!(f.store.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_book_unknown_slot_or_subject() {
        let f = fixture().await;
        let (tutee, _) = f.store.seed_tutee("a@example.com").await;

        let err = f.bookings.book(&tutee, SlotId(999), None).await.unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(_)));

        let err = f
            .bookings
            .book(&tutee, f.slot_id, Some(SubjectId(999)))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(_)));
        assert_eq!(f.store.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_book_with_tutor_without_subjects() {
        let f = fixture().await;
        let (other_tutor, _) = f.store.seed_tutor("bare@example.com").await;
        let (tutee, _) = f.store.seed_tutee("a@example.com").await;
        let slot = f
            .slots
            .create(&other_tutor, Utc.with_ymd_and_hms(2024, 12, 11, 2, 0, 0).unwrap())
            .await
            .unwrap();

        let err = f.bookings.book(&tutee, slot.id, None).await.unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(m) if m.contains("no subjects")));
    }

    #[tokio::test]
    async fn test_requested_subject_is_used() {
        let f = fixture().await;
        let (_, other_tutor) = f.store.seed_tutor("other@example.com").await;
        let foreign = f.store.insert_subject(other_tutor.id, "Geometry").await.unwrap();
        let (tutee, _) = f.store.seed_tutee("a@example.com").await;

        // A subject owned by a different tutor is not offered for this slot.
        let err = f
            .bookings
            .book(&tutee, f.slot_id, Some(foreign.id))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(_)));

        let booking = f
            .bookings
            .book(&tutee, f.slot_id, Some(f.subject_id))
            .await
            .unwrap();
        assert_eq!(booking.subject_id, f.subject_id);
    }

    #[tokio::test]
    async fn test_status_of_missing_slot() {
        let f = fixture().await;
        let err = f.bookings.status(SlotId(999)).await.unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bookings_for_session_by_role() {
        let f = fixture().await;
        let (tutee, _) = f.store.seed_tutee("a@example.com").await;
        let booking = f.bookings.book(&tutee, f.slot_id, None).await.unwrap();

        assert_eq!(f.bookings.bookings_for_session(&tutee).await.unwrap(), vec![booking]);
        assert_eq!(
            f.bookings.bookings_for_session(&f.tutor_session).await.unwrap(),
            vec![booking]
        );
        let err = f
            .bookings
            .bookings_for_session(&SessionContext::anonymous())
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::Authorization(_)));
    }
}
